//! Caller-supplied inputs for card operations.

use chrono::NaiveDate;

/// Card data for 3-D Secure checks and payments.
///
/// Only the month and year of `expiry` are sent to the gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pan: String,
    expiry: NaiveDate,
    cvc: String,
    card_holder: String,
}

impl CardDetails {
    pub fn new(
        pan: impl Into<String>,
        expiry: NaiveDate,
        cvc: impl Into<String>,
        card_holder: impl Into<String>,
    ) -> Self {
        Self {
            pan: pan.into(),
            expiry,
            cvc: cvc.into(),
            card_holder: card_holder.into(),
        }
    }

    pub fn pan(&self) -> &str {
        &self.pan
    }

    pub fn cvc(&self) -> &str {
        &self.cvc
    }

    pub fn card_holder(&self) -> &str {
        &self.card_holder
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    /// Two-digit month, e.g. `"07"`.
    pub fn expiry_month(&self) -> String {
        self.expiry.format("%m").to_string()
    }

    /// Four-digit year, e.g. `"2027"`.
    pub fn expiry_year(&self) -> String {
        self.expiry.format("%Y").to_string()
    }

    /// Year followed by month, e.g. `"202707"`.
    pub fn expiry_yyyymm(&self) -> String {
        self.expiry.format("%Y%m").to_string()
    }

    fn masked_pan(&self) -> String {
        let len = self.pan.chars().count();
        if len <= 10 {
            return "*".repeat(len);
        }
        let head: String = self.pan.chars().take(6).collect();
        let tail: String = self.pan.chars().skip(len - 4).collect();
        format!("{head}{}{tail}", "*".repeat(len - 10))
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("pan", &self.masked_pan())
            .field("expiry", &self.expiry_yyyymm())
            .field("cvc", &"[REDACTED]")
            .field("card_holder", &self.card_holder)
            .finish()
    }
}

/// Browser fingerprint forwarded to the issuer for 3-D Secure 2 risk checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFingerprint {
    java_script_enabled: bool,
    language: String,
    screen_height: u32,
    screen_width: u32,
    time_zone: i32,
    java_enabled: bool,
    screen_color_depth: u32,
}

impl DeviceFingerprint {
    pub fn new(
        java_script_enabled: bool,
        language: impl Into<String>,
        screen_height: u32,
        screen_width: u32,
        time_zone: i32,
        java_enabled: bool,
        screen_color_depth: u32,
    ) -> Self {
        Self {
            java_script_enabled,
            language: language.into(),
            screen_height,
            screen_width,
            time_zone,
            java_enabled,
            screen_color_depth,
        }
    }

    pub fn java_script_enabled(&self) -> bool {
        self.java_script_enabled
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Offset from UTC in minutes, as reported by the browser.
    pub fn time_zone(&self) -> i32 {
        self.time_zone
    }

    pub fn java_enabled(&self) -> bool {
        self.java_enabled
    }

    pub fn screen_color_depth(&self) -> u32 {
        self.screen_color_depth
    }

    /// The seven `browser*` wire fields, booleans rendered as `"true"`/`"false"`.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "browserJavaScriptEnabled",
                self.java_script_enabled.to_string(),
            ),
            ("browserJavaEnabled", self.java_enabled.to_string()),
            (
                "browserScreenColorDepth",
                self.screen_color_depth.to_string(),
            ),
            ("browserTimeZone", self.time_zone.to_string()),
            ("browserScreenWidth", self.screen_width.to_string()),
            ("browserScreenHeight", self.screen_height.to_string()),
            ("browserLanguage", self.language.clone()),
        ]
    }
}
