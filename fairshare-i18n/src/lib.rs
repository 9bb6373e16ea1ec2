#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const PARTICIPANT: &str = "参加者";
    pub const SHARE: &str = "負担額";
    pub const PERCENTAGE: &str = "割合";
    pub const REASONING: &str = "理由";
    pub const EQUAL_SHARE: &str = "均等割";
    pub const SAVINGS: &str = "差額";
    pub const PAID: &str = "立替額";
    pub const OWED: &str = "負担額";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const ITEM: &str = "項目";
    pub const WEIGHT: &str = "重み";
    pub const TOTAL: &str = "合計";
    pub const ALLOCATION_HEADING: &str = "負担の内訳";
    pub const SETTLEMENT_HEADING: &str = "精算";
    pub const BREAKDOWN_HEADING: &str = "項目別の内訳";
    pub const ALL_SETTLED: &str = "精算は不要です。";
    pub const EQUAL_SPLIT_FALLBACK: &str = "(全員の重みが0のため均等割)";
    pub const PASS: &str = "PASS";
    pub const FAIL: &str = "FAIL";
    pub const NO_PARTICIPANTS: &str = "参加者が一人もいません。";
    pub const TOTAL_OVERFLOW: &str = "合計金額が扱える範囲を超えています。";
    pub const SPLIT_FAILED: &str = "割り勘の計算に失敗しました";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const PARTICIPANT: &str = "Participant";
    pub const SHARE: &str = "Share";
    pub const PERCENTAGE: &str = "Percentage";
    pub const REASONING: &str = "Reasoning";
    pub const EQUAL_SHARE: &str = "Equal Share";
    pub const SAVINGS: &str = "Savings";
    pub const PAID: &str = "Paid";
    pub const OWED: &str = "Owed";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const ITEM: &str = "Item";
    pub const WEIGHT: &str = "Weight";
    pub const TOTAL: &str = "Total";
    pub const ALLOCATION_HEADING: &str = "Allocation";
    pub const SETTLEMENT_HEADING: &str = "Settlements";
    pub const BREAKDOWN_HEADING: &str = "Item breakdown";
    pub const ALL_SETTLED: &str = "Everyone is already settled up.";
    pub const EQUAL_SPLIT_FALLBACK: &str = "(every weight was zero; split equally)";
    pub const PASS: &str = "PASS";
    pub const FAIL: &str = "FAIL";
    pub const NO_PARTICIPANTS: &str = "At least one participant is required.";
    pub const TOTAL_OVERFLOW: &str = "The item total is too large to process.";
    pub const SPLIT_FAILED: &str = "Split calculation failed";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn duplicate_participant(id: impl std::fmt::Display) -> String {
    format!("参加者ID '{id}' が重複しています")
}

#[cfg(feature = "ja")]
pub fn negative_amount(item: impl std::fmt::Display, amount: impl std::fmt::Display) -> String {
    format!("項目 '{item}' の金額がマイナスです ({amount})")
}

#[cfg(feature = "ja")]
pub fn unattributed_item(item: impl std::fmt::Display) -> String {
    format!("項目 '{item}' の支払人が参加者の中にいません")
}

#[cfg(feature = "ja")]
pub fn invalid_request(detail: impl std::fmt::Display) -> String {
    format!("リクエストを読み込めません: {detail}")
}

#[cfg(feature = "ja")]
pub fn split_summary(
    title: impl std::fmt::Display,
    total: impl std::fmt::Display,
    participant_count: usize,
    settlement_count: usize,
) -> String {
    format!(
        "{title}: 合計 {total} を{participant_count}人で分担し、{settlement_count}件の送金で精算します。"
    )
}

#[cfg(feature = "ja")]
pub fn eval_summary(passed: usize, total: usize) -> String {
    format!("評価完了: {passed}/{total} 件成功")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_participant(id: impl std::fmt::Display) -> String {
    format!("Participant id '{id}' appears more than once")
}

#[cfg(not(feature = "ja"))]
pub fn negative_amount(item: impl std::fmt::Display, amount: impl std::fmt::Display) -> String {
    format!("Item '{item}' has a negative amount ({amount})")
}

#[cfg(not(feature = "ja"))]
pub fn unattributed_item(item: impl std::fmt::Display) -> String {
    format!("Item '{item}' does not name a participant as its payer")
}

#[cfg(not(feature = "ja"))]
pub fn invalid_request(detail: impl std::fmt::Display) -> String {
    format!("Could not read the request: {detail}")
}

#[cfg(not(feature = "ja"))]
pub fn split_summary(
    title: impl std::fmt::Display,
    total: impl std::fmt::Display,
    participant_count: usize,
    settlement_count: usize,
) -> String {
    format!(
        "{title}: {total} shared by {participant_count} participants, settled with {settlement_count} transfer(s)."
    )
}

#[cfg(not(feature = "ja"))]
pub fn eval_summary(passed: usize, total: usize) -> String {
    format!("Evaluation complete: {passed}/{total} passed")
}
