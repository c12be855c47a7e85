//! Bank transfer instructions shown after submitting a payment request.

use serde::Serialize;

use super::PaymentRequest;

pub const VIETQR_IMAGE_BASE: &str = "https://img.vietqr.io/image";

/// Receiving bank account, configured per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    /// NAPAS bank identification number, e.g. `970436` for Vietcombank.
    pub bank_bin: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub qr_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInstructions {
    pub bank_name: String,
    pub bank_bin: String,
    pub account_number: String,
    pub account_holder: String,
    pub amount_vnd: i64,
    /// Text to put in the transfer memo.
    pub transfer_memo: String,
    pub qr_image_url: String,
}

impl BankAccount {
    pub fn instructions_for(&self, request: &PaymentRequest) -> PaymentInstructions {
        PaymentInstructions {
            bank_name: self.bank_name.clone(),
            bank_bin: self.bank_bin.clone(),
            account_number: self.account_number.clone(),
            account_holder: self.account_holder.clone(),
            amount_vnd: request.amount_vnd,
            transfer_memo: request.transfer_reference.clone(),
            qr_image_url: self.qr_image_url(request.amount_vnd, &request.transfer_reference),
        }
    }

    /// VietQR quick-link image for a prefilled transfer.
    pub fn qr_image_url(&self, amount_vnd: i64, memo: &str) -> String {
        format!(
            "{}/{}-{}-compact2.png?amount={}&addInfo={}&accountName={}",
            self.qr_base_url.trim_end_matches('/'),
            self.bank_bin,
            self.account_number,
            amount_vnd,
            urlencoding::encode(memo),
            urlencoding::encode(&self.account_holder),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::payment::Plan;

    fn bank() -> BankAccount {
        BankAccount {
            bank_bin: "970436".to_string(),
            bank_name: "Vietcombank".to_string(),
            account_number: "0123456789".to_string(),
            account_holder: "CONG TY GIA SU".to_string(),
            qr_base_url: format!("{}/", VIETQR_IMAGE_BASE),
        }
    }

    #[test]
    fn qr_url_follows_vietqr_quicklink_format() {
        let url = bank().qr_image_url(99_000, "GS1A2B3C4D");
        assert_eq!(
            url,
            "https://img.vietqr.io/image/970436-0123456789-compact2.png?amount=99000&addInfo=GS1A2B3C4D&accountName=CONG%20TY%20GIA%20SU"
        );
    }

    #[test]
    fn instructions_use_request_amount_and_reference() {
        let req = PaymentRequest::submit(UserId::new(), Plan::Premium, None).unwrap();
        let ins = bank().instructions_for(&req);
        assert_eq!(ins.amount_vnd, 199_000);
        assert_eq!(ins.transfer_memo, req.transfer_reference);
        assert!(ins.qr_image_url.contains(&req.transfer_reference));
    }
}
