//! Gateway response parsing and the typed results returned by [`EpgClient`](crate::EpgClient).
//!
//! The gateway's JSON is loosely typed: amounts arrive as numbers or numeric
//! strings, status ids as strings or integers, and several order fields are
//! omitted depending on the order's state. The decoders here accept all of
//! those shapes and reject only what cannot be interpreted.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::REFUND_SUCCESS_CODE;
use crate::error::EpgError;

/// Parse a raw body and check the top-level `errorCode`.
///
/// Returns the JSON object when the code is absent, null or zero.
pub fn parse_body(body: &str) -> Result<Value, EpgError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| EpgError::invalid_response(format!("response is not valid JSON: {e}"), body))?;

    if !value.is_object() {
        return Err(EpgError::invalid_response("response is not a JSON object", body));
    }

    if let Some(code) = value.get("errorCode").and_then(coerce_error_code) {
        if code != 0 {
            let message = match value.get("errorMessage") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            return Err(EpgError::Gateway { code, message });
        }
    }

    Ok(value)
}

/// Parse a raw body, check it for a business error, and map it into `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, EpgError> {
    let value = parse_body(body)?;
    serde_json::from_value(value).map_err(|e| EpgError::invalid_response(e.to_string(), body))
}

/// Integer coercion of an `errorCode` value. `None` means "no code present".
fn coerce_error_code(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => Some(leading_integer(s)),
        Value::Array(a) => Some(i64::from(!a.is_empty())),
        Value::Object(_) => Some(1),
    }
}

/// `" 12abc"` -> 12, `"-3"` -> -3, `"abc"` -> 0.
///
/// Digit runs outside the i64 range saturate, so an oversized code never reads as zero.
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let saturated = if negative { i64::MIN } else { i64::MAX };

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .try_fold(0i64, |acc, b| {
            let digit = i64::from(b - b'0');
            let acc = acc.checked_mul(10)?;
            if negative {
                acc.checked_sub(digit)
            } else {
                acc.checked_add(digit)
            }
        })
        .unwrap_or(saturated)
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn de_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = Value::deserialize(d)?;
    value_to_f64(&v).ok_or_else(|| de::Error::custom(format!("expected a number, got {v}")))
}

fn de_opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        v => value_to_f64(&v)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a number, got {v}"))),
    }
}

fn de_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = Value::deserialize(d)?;
    value_to_i64(&v).ok_or_else(|| de::Error::custom(format!("expected an integer, got {v}")))
}

fn de_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    value_to_string(&v).ok_or_else(|| de::Error::custom(format!("expected a string, got {v}")))
}

fn de_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        v => value_to_string(&v)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a string, got {v}"))),
    }
}

/// Empty strings count as absent.
fn de_opt_nonempty_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(de_opt_string(d)?.filter(|s| !s.is_empty()))
}

/// Absent or null codes become the empty string.
fn de_code<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(de_opt_string(d)?.unwrap_or_default())
}

fn de_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match Value::deserialize(d)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(de::Error::custom(format!("expected a boolean, got {other:?}"))),
        },
        v => Err(de::Error::custom(format!("expected a boolean, got {v}"))),
    }
}

/// Result of order registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(rename = "orderId", deserialize_with = "de_string")]
    order_id: String,
    #[serde(rename = "formUrl", deserialize_with = "de_string")]
    form_url: String,
}

impl NewOrder {
    /// Gateway-assigned order id (the `mdOrder` of later calls).
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Hosted payment page for this order.
    pub fn form_url(&self) -> &str {
        &self.form_url
    }
}

/// Result of a card payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(deserialize_with = "de_string")]
    info: String,
    #[serde(rename = "acsUrl", deserialize_with = "de_string")]
    acs_url: String,
    #[serde(rename = "cReq", deserialize_with = "de_string")]
    c_req: String,
}

impl Payment {
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Issuer ACS URL the cardholder is redirected to for the challenge.
    pub fn acs_url(&self) -> &str {
        &self.acs_url
    }

    /// 3-D Secure 2 challenge request payload to post to the ACS.
    pub fn c_req(&self) -> &str {
        &self.c_req
    }
}

/// 3-D Secure protocol version supported by a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(rename = "3ds", deserialize_with = "de_i64")]
    version: i64,
}

impl Version {
    pub fn version(&self) -> i64 {
        self.version
    }
}

/// Merchant balance in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "available_amount", deserialize_with = "de_f64")]
    amount: f64,
}

impl Balance {
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Outcome of a refund or reversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(rename = "errorCode", default, deserialize_with = "de_code")]
    code: String,
}

impl Refund {
    /// The `errorCode` as returned, empty if the gateway sent none.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// True only when the gateway returned the code `"0"`.
    pub fn is_success(&self) -> bool {
        self.code == REFUND_SUCCESS_CODE
    }
}

/// Snapshot of an order as reported by the transaction status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    #[serde(rename = "OrderId", deserialize_with = "de_string")]
    order_id: String,
    #[serde(rename = "Description", deserialize_with = "de_string")]
    description: String,
    #[serde(rename = "Amount", deserialize_with = "de_f64")]
    amount: f64,
    #[serde(rename = "Currency", deserialize_with = "de_i64")]
    currency: i64,
    #[serde(rename = "Fee", default, deserialize_with = "de_opt_f64")]
    fee: Option<f64>,
    #[serde(rename = "Timestamp", deserialize_with = "de_string")]
    timestamp: String,
    #[serde(rename = "status", deserialize_with = "de_string")]
    status: String,
    #[serde(rename = "order_status", deserialize_with = "de_string")]
    status_id: String,
    #[serde(rename = "provider", default, deserialize_with = "de_opt_string")]
    provider: Option<String>,
    #[serde(rename = "Pan", default, deserialize_with = "de_opt_nonempty_string")]
    card: Option<String>,
    #[serde(rename = "RRN", default, deserialize_with = "de_opt_string")]
    rrn: Option<String>,
    #[serde(rename = "Success", deserialize_with = "de_bool")]
    success: bool,
    #[serde(rename = "Auth", default, deserialize_with = "de_opt_string")]
    auth: Option<String>,
}

impl OrderInfo {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// ISO 4217 numeric currency code.
    pub fn currency(&self) -> i64 {
        self.currency
    }

    pub fn fee(&self) -> Option<f64> {
        self.fee
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Human-readable status text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Numeric order status as sent by the gateway.
    pub fn status_id(&self) -> &str {
        &self.status_id
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Masked card number.
    pub fn card(&self) -> Option<&str> {
        self.card.as_deref()
    }

    /// Retrieval reference number.
    pub fn rrn(&self) -> Option<&str> {
        self.rrn.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Authorization code.
    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_rejects_non_json_with_raw_body() {
        let err = parse_body("<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.raw_body(), Some("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_parse_body_rejects_non_object() {
        let err = parse_body("[1,2,3]").unwrap_err();
        assert_eq!(err.raw_body(), Some("[1,2,3]"));
    }

    #[test]
    fn test_error_code_zero_variants_pass() {
        for body in [
            r#"{"errorCode":0}"#,
            r#"{"errorCode":"0"}"#,
            r#"{"errorCode":""}"#,
            r#"{"errorCode":null}"#,
            r#"{"orderId":"x"}"#,
        ] {
            assert!(parse_body(body).is_ok(), "{body} should not be an error");
        }
    }

    #[test]
    fn test_error_code_nonzero_raises_gateway_error() {
        let err = parse_body(r#"{"errorCode":"7","errorMessage":"Order not found"}"#).unwrap_err();
        match err {
            EpgError::Gateway { code, message } => {
                assert_eq!(code, 7);
                assert_eq!(message, "Order not found");
            }
            other => panic!("expected gateway error, got {other:?}"),
        }

        let err = parse_body(r#"{"errorCode":5}"#).unwrap_err();
        match err {
            EpgError::Gateway { code, message } => {
                assert_eq!(code, 5);
                assert!(message.is_empty());
            }
            other => panic!("expected gateway error, got {other:?}"),
        }
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("12abc"), 12);
        assert_eq!(leading_integer("  -3"), -3);
        assert_eq!(leading_integer("abc"), 0);
        assert_eq!(leading_integer(""), 0);
        assert_eq!(leading_integer("+4"), 4);
        assert_eq!(leading_integer("-9223372036854775808"), i64::MIN);
        assert_eq!(leading_integer("99999999999999999999"), i64::MAX);
        assert_eq!(leading_integer("-99999999999999999999x"), i64::MIN);
    }

    #[test]
    fn test_oversized_error_code_is_still_a_gateway_error() {
        let err = parse_body(r#"{"errorCode":"99999999999999999999","errorMessage":"System error"}"#)
            .unwrap_err();
        match err {
            EpgError::Gateway { code, message } => {
                assert_eq!(code, i64::MAX);
                assert_eq!(message, "System error");
            }
            other => panic!("expected gateway error, got {other:?}"),
        }

        let err = parse_body(r#"{"errorCode":99999999999999999999}"#).unwrap_err();
        assert_eq!(err.gateway_code(), Some(i64::MAX));
    }

    #[test]
    fn test_refund_code_semantics() {
        let ok: Refund = decode(r#"{"errorCode":"0"}"#).unwrap();
        assert!(ok.is_success());

        let numeric: Refund = decode(r#"{"errorCode":0}"#).unwrap();
        assert!(numeric.is_success());

        let empty: Refund = decode(r#"{"errorCode":""}"#).unwrap();
        assert!(!empty.is_success());
        assert_eq!(empty.code(), "");

        let missing: Refund = decode(r#"{}"#).unwrap();
        assert!(!missing.is_success());

        let padded: Refund = decode(r#"{"errorCode":"00"}"#).unwrap();
        assert!(!padded.is_success());
    }

    #[test]
    fn test_order_info_full_mapping() {
        let body = r#"{
            "OrderId": "abc-123",
            "Description": "Test order",
            "Amount": "10.50",
            "Currency": "944",
            "Fee": 0.25,
            "Timestamp": "2026-10-19 12:00:00",
            "status": "DEPOSITED",
            "order_status": 2,
            "provider": "VISA",
            "Pan": "411111**1111",
            "RRN": "123456789012",
            "Success": true,
            "Auth": "A1B2C3"
        }"#;
        let info: OrderInfo = decode(body).unwrap();
        assert_eq!(info.order_id(), "abc-123");
        assert_eq!(info.description(), "Test order");
        assert_eq!(info.amount(), 10.5);
        assert_eq!(info.currency(), 944);
        assert_eq!(info.fee(), Some(0.25));
        assert_eq!(info.timestamp(), "2026-10-19 12:00:00");
        assert_eq!(info.status(), "DEPOSITED");
        assert_eq!(info.status_id(), "2");
        assert_eq!(info.provider(), Some("VISA"));
        assert_eq!(info.card(), Some("411111**1111"));
        assert_eq!(info.rrn(), Some("123456789012"));
        assert!(info.is_success());
        assert_eq!(info.auth(), Some("A1B2C3"));
    }

    #[test]
    fn test_order_info_optional_fields_absent() {
        let body = r#"{
            "OrderId": "abc-123",
            "Description": "Pending",
            "Amount": 100,
            "Currency": 840,
            "Timestamp": "2026-10-19 12:00:00",
            "status": "CREATED",
            "order_status": "0",
            "Pan": "",
            "Success": false
        }"#;
        let info: OrderInfo = decode(body).unwrap();
        assert_eq!(info.fee(), None);
        assert_eq!(info.provider(), None);
        assert_eq!(info.card(), None);
        assert_eq!(info.rrn(), None);
        assert_eq!(info.auth(), None);
        assert!(!info.is_success());
    }

    #[test]
    fn test_missing_required_field_is_invalid_response() {
        let body = r#"{"orderId":"abc"}"#;
        let err = decode::<NewOrder>(body).unwrap_err();
        assert_eq!(err.raw_body(), Some(body));
        assert!(err.to_string().contains("formUrl"));
    }

    #[test]
    fn test_balance_accepts_string_amount() {
        let balance: Balance = decode(r#"{"available_amount":"1234.56"}"#).unwrap();
        assert_eq!(balance.amount(), 1234.56);

        let balance: Balance = decode(r#"{"available_amount":0}"#).unwrap();
        assert_eq!(balance.amount(), 0.0);
    }

    #[test]
    fn test_version_from_3ds_field() {
        let version: Version = decode(r#"{"3ds":"2"}"#).unwrap();
        assert_eq!(version.version(), 2);
    }
}
