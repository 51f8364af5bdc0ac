use serde::de::DeserializeOwned;

use crate::config::EpgConfig;
use crate::constants::{
    merchant_balance_path, order_status_path, CHECK_3DS_VERSION_PATH, PAYMENT_ORDER_PATH,
    REFUND_PATH, REGISTER_PATH,
};
use crate::error::EpgError;
use crate::params::{CardDetails, DeviceFingerprint};
use crate::request::{JsonParams, RequestFields};
use crate::response::{self, Balance, NewOrder, OrderInfo, Payment, Refund, Version};

/// Client for the GuavaPay Electronic Payment Gateway.
///
/// Every operation is a single POST with its parameters (plus the merchant
/// credentials) in the query string. The body is parsed as JSON whatever the
/// HTTP status; a non-zero `errorCode` becomes [`EpgError::Gateway`].
pub struct EpgClient {
    http: reqwest::Client,
    config: EpgConfig,
}

impl EpgClient {
    pub fn new(config: EpgConfig) -> Result<Self, EpgError> {
        if config.accept_invalid_certs {
            tracing::warn!(
                base_url = %config.base_url,
                "TLS certificate verification is disabled for the EPG client"
            );
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { http, config })
    }

    /// Create a client with a custom reqwest::Client.
    /// Timeout and TLS settings from `config` are ignored in favour of the client's own.
    pub fn with_http_client(config: EpgConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &EpgConfig {
        &self.config
    }

    /// Register a new order and get the hosted payment page for it.
    ///
    /// `amount` is in minor units, `currency` is the ISO 4217 numeric code.
    pub async fn create_order(
        &self,
        order_number: &str,
        amount: u64,
        currency: u16,
        return_url: &str,
    ) -> Result<NewOrder, EpgError> {
        let mut fields = RequestFields::new();
        fields
            .push("orderNumber", order_number)
            .push("amount", amount)
            .push("currency", currency)
            .push("returnUrl", return_url)
            .push("jsonParams", self.json_params()?);

        self.call(REGISTER_PATH, fields).await
    }

    /// Refund or reverse `amount` (minor units) of a registered order.
    pub async fn refund_order(&self, order_id: &str, amount: u64) -> Result<Refund, EpgError> {
        let mut fields = RequestFields::new();
        fields
            .push("orderId", order_id)
            .push("amount", amount)
            .push("jsonParams", self.json_params()?);

        let refund: Refund = self.call(REFUND_PATH, fields).await?;
        if !refund.is_success() {
            tracing::warn!(order_id, code = refund.code(), "EPG refund not confirmed");
        }
        Ok(refund)
    }

    /// Ask which 3-D Secure version the card's issuer supports.
    ///
    /// `ip` is the cardholder's address; `None` omits it from the request.
    pub async fn check_3ds_version(
        &self,
        order_id: &str,
        card: &CardDetails,
        ip: Option<&str>,
    ) -> Result<Version, EpgError> {
        let mut fields = RequestFields::new();
        fields
            .push("mdOrder", order_id)
            .push("pan", card.pan())
            .push("$CVC", card.cvc())
            .push("$EXPIRY", card.expiry_yyyymm())
            .push("TEXT", card.card_holder())
            .push_opt("ip", ip);

        self.call(CHECK_3DS_VERSION_PATH, fields).await
    }

    /// Pay a registered order with card details.
    ///
    /// The browser fields are sent only when `device` is given.
    pub async fn payment_request(
        &self,
        order_id: &str,
        card: &CardDetails,
        device: Option<&DeviceFingerprint>,
        ip: Option<&str>,
    ) -> Result<Payment, EpgError> {
        let mut fields = RequestFields::new();
        fields
            .push("MDORDER", order_id)
            .push("$PAN", card.pan())
            .push("$CVC", card.cvc())
            .push("YYYY", card.expiry_year())
            .push("MM", card.expiry_month())
            .push("TEXT", card.card_holder())
            .push_opt("ip", ip);
        if let Some(device) = device {
            fields.extend(device.fields());
        }

        self.call(PAYMENT_ORDER_PATH, fields).await
    }

    /// Look up an order by its gateway order id.
    pub async fn get_order_status(
        &self,
        order_id: &str,
        transaction_code: &str,
    ) -> Result<OrderInfo, EpgError> {
        let mut fields = RequestFields::new();
        fields.push("mdorder", order_id);

        self.call(&order_status_path(transaction_code), fields).await
    }

    /// Available merchant balance in one currency (ISO 4217 numeric).
    pub async fn get_balance_status(
        &self,
        currency: u16,
        merchant_code: &str,
    ) -> Result<Balance, EpgError> {
        let mut fields = RequestFields::new();
        fields.push("currency", currency);

        self.call(&merchant_balance_path(merchant_code), fields).await
    }

    fn json_params(&self) -> Result<String, EpgError> {
        Ok(JsonParams::for_config(&self.config).encode()?)
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send one request and decode its body into `T`.
    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        mut fields: RequestFields,
    ) -> Result<T, EpgError> {
        fields.push_credentials(&self.config);
        let url = self.endpoint_url(path);

        // The query string carries credentials and card data; log the path only.
        tracing::debug!(endpoint = path, fields = fields.len(), "EPG request");

        let resp = self
            .http
            .post(&url)
            .query(fields.as_pairs())
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::warn!(endpoint = path, error = %e, "EPG request failed");
                EpgError::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = path,
                status = status.as_u16(),
                "EPG returned non-success HTTP status"
            );
        }

        let body = resp
            .text()
            .await
            .map_err(|e| EpgError::Transport(e.without_url()))?;

        match response::decode::<T>(&body) {
            Ok(result) => {
                tracing::debug!(endpoint = path, "EPG request succeeded");
                Ok(result)
            }
            Err(e) => {
                match &e {
                    EpgError::Gateway { code, message } => {
                        tracing::warn!(endpoint = path, code, message = %message, "EPG gateway error");
                    }
                    EpgError::InvalidResponse { reason, .. } => {
                        tracing::warn!(endpoint = path, reason = %reason, "EPG response could not be decoded");
                    }
                    _ => {}
                }
                Err(e)
            }
        }
    }
}
