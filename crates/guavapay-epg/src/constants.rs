/// Production gateway host.
pub const BASE_URL: &str = "https://epg.guavapay.com";

/// Order registration endpoint.
pub const REGISTER_PATH: &str = "epg/rest/register.do";

/// Refund / reversal endpoint.
pub const REFUND_PATH: &str = "epg/rest/refund.do";

/// 3-D Secure version lookup endpoint.
pub const CHECK_3DS_VERSION_PATH: &str = "epg/rest/check3dsversion.do";

/// Card payment endpoint.
pub const PAYMENT_ORDER_PATH: &str = "epg/rest/paymentorder.do";

/// Value of both `request` and `description` inside the `jsonParams` blob.
pub const REQUEST_KIND: &str = "PAY";

/// `errorCode` value the gateway returns for an accepted refund.
pub const REFUND_SUCCESS_CODE: &str = "0";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `transaction/{code}/status`
pub fn order_status_path(transaction_code: &str) -> String {
    format!("transaction/{transaction_code}/status")
}

/// `merchant/{code}/balance`
pub fn merchant_balance_path(merchant_code: &str) -> String {
    format!("merchant/{merchant_code}/balance")
}
