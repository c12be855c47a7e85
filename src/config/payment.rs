//! Payment configuration (receiving bank account for manual transfers)

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::payment::{BankAccount, VIETQR_IMAGE_BASE};

/// Account users transfer to, shown with a VietQR code
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// NAPAS BIN of the receiving bank
    pub bank_bin: String,

    pub bank_name: String,

    pub account_number: String,

    /// Holder name as printed by the bank (upper case, no diacritics)
    pub account_holder: String,

    /// VietQR image service base URL
    #[serde(default = "default_qr_base_url")]
    pub qr_base_url: String,
}

impl PaymentConfig {
    pub fn bank_account(&self) -> BankAccount {
        BankAccount {
            bank_bin: self.bank_bin.trim().to_string(),
            bank_name: self.bank_name.trim().to_string(),
            account_number: self.account_number.trim().to_string(),
            account_holder: self.account_holder.trim().to_string(),
            qr_base_url: self.qr_base_url.trim().to_string(),
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bin = self.bank_bin.trim();
        if bin.is_empty() {
            return Err(ValidationError::MissingRequired("GIASU__PAYMENT__BANK_BIN"));
        }
        if bin.len() != 6 || !bin.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidBankBin);
        }

        let number = self.account_number.trim();
        if number.is_empty() {
            return Err(ValidationError::MissingRequired("GIASU__PAYMENT__ACCOUNT_NUMBER"));
        }
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidAccountNumber);
        }

        if self.bank_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GIASU__PAYMENT__BANK_NAME"));
        }
        if self.account_holder.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GIASU__PAYMENT__ACCOUNT_HOLDER"));
        }
        Ok(())
    }
}

fn default_qr_base_url() -> String {
    VIETQR_IMAGE_BASE.to_string()
}
