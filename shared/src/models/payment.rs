//! Payment Transaction Model
//!
//! One payment attempt/cancellation unit. Created upstream when a payment
//! is approved at the kiosk terminal; the coordination core only ever
//! moves it to `cancelled`, and only through a successful cancellation
//! round-trip.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment method used at the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    Credit,
    Debit,
    CashReceipt,
    SimplePay,
}

impl PayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::CashReceipt => "cash_receipt",
            Self::SimplePay => "simple_pay",
        }
    }
}

impl fmt::Display for PayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            "cash_receipt" => Ok(Self::CashReceipt),
            "simple_pay" => Ok(Self::SimplePay),
            _ => Err(()),
        }
    }
}

/// Payment transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Cancelled,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "cancelled" => Ok(Self::Cancelled),
            "failed" => Ok(Self::Failed),
            _ => Err(()),
        }
    }
}

/// Payment transaction row (payment_transactions table)
///
/// Amounts are whole currency units (KRW has no minor unit).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentTransaction {
    pub id: i64,
    pub reservation_id: Option<i64>,
    /// External payment processor's own id, unique
    pub transaction_id: String,
    pub amount: i64,
    pub tax: i64,
    /// Payment type string (see [`PayType`])
    pub pay_type: String,
    /// Status string (see [`PaymentStatus`])
    pub status: String,
    pub approval_no: Option<String>,
    /// Auth date as reported by the terminal (YYMMDD)
    pub approved_date: Option<String>,
    /// Auth time as reported by the terminal (HHMMSS)
    pub approved_time: Option<String>,
    /// Masked card number
    pub card_no: Option<String>,
    pub card_name: Option<String>,
    pub installment: Option<i64>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub cancelled_at: Option<i64>,
    pub created_at: i64,
}

/// Approval metadata echoed back after a successful cancellation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelApproval {
    pub approval_no: String,
    pub approved_date: Option<String>,
    pub approved_time: Option<String>,
}
