use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer, ser::Error as _};
use serde_with::{DisplayFromStr, serde_as};

use super::CryptoCurrency;
use crate::error::OrderValidationError;
use crate::values::{Address, Amount, BaseUnits, OrderId, Rate};

/// Parameters of one proposed crypto-to-crypto exchange
///
/// Built once when the user starts an exchange, then handed between the
/// layers that display it, park it across lifecycle events and finally
/// submit it. `order_id` and both addresses are fixed at construction;
/// the currencies, amounts, rate and fees may be revised afterwards.
///
/// The transfer form keeps the field order below with camelCase names.
/// Decimals and the base-unit fee travel as strings so no precision is lost.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExchangeOrder {
    order_id: OrderId,
    from_currency: CryptoCurrency,
    to_currency: CryptoCurrency,
    #[serde(with = "exact_decimal")]
    deposit_amount: Amount,
    #[serde(with = "exact_decimal")]
    withdrawal_amount: Amount,
    #[serde(serialize_with = "serialize_rate")]
    exchange_rate: Rate,
    /// Fee in the source chain's smallest unit (satoshi or wei)
    #[serde_as(as = "DisplayFromStr")]
    transaction_fee: BaseUnits,
    #[serde(with = "exact_decimal")]
    network_fee: Amount,
    receive_address: Address,
    change_address: Address,
}

impl ExchangeOrder {
    /// Create an order from all of its fields. Nothing is checked here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: impl Into<OrderId>,
        from_currency: CryptoCurrency,
        to_currency: CryptoCurrency,
        deposit_amount: Amount,
        withdrawal_amount: Amount,
        exchange_rate: Rate,
        transaction_fee: impl Into<BaseUnits>,
        network_fee: Amount,
        receive_address: impl Into<Address>,
        change_address: impl Into<Address>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            from_currency,
            to_currency,
            deposit_amount,
            withdrawal_amount,
            exchange_rate,
            transaction_fee: transaction_fee.into(),
            network_fee,
            receive_address: receive_address.into(),
            change_address: change_address.into(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn from_currency(&self) -> CryptoCurrency {
        self.from_currency
    }

    pub fn to_currency(&self) -> CryptoCurrency {
        self.to_currency
    }

    pub fn deposit_amount(&self) -> Amount {
        self.deposit_amount
    }

    pub fn withdrawal_amount(&self) -> Amount {
        self.withdrawal_amount
    }

    pub fn exchange_rate(&self) -> Rate {
        self.exchange_rate
    }

    pub fn transaction_fee(&self) -> &BaseUnits {
        &self.transaction_fee
    }

    pub fn network_fee(&self) -> Amount {
        self.network_fee
    }

    pub fn receive_address(&self) -> &str {
        &self.receive_address
    }

    pub fn change_address(&self) -> &str {
        &self.change_address
    }

    pub fn set_from_currency(&mut self, currency: CryptoCurrency) {
        self.from_currency = currency;
    }

    pub fn set_to_currency(&mut self, currency: CryptoCurrency) {
        self.to_currency = currency;
    }

    pub fn set_deposit_amount(&mut self, amount: Amount) {
        self.deposit_amount = amount;
    }

    pub fn set_withdrawal_amount(&mut self, amount: Amount) {
        self.withdrawal_amount = amount;
    }

    pub fn set_exchange_rate(&mut self, rate: Rate) {
        self.exchange_rate = rate;
    }

    pub fn set_transaction_fee(&mut self, fee: impl Into<BaseUnits>) {
        self.transaction_fee = fee.into();
    }

    pub fn set_network_fee(&mut self, fee: Amount) {
        self.network_fee = fee;
    }

    /// Transaction fee converted to the source asset's display units
    ///
    /// Returns `None` if the fee does not fit a `Decimal` mantissa.
    pub fn transaction_fee_in_units(&self) -> Option<Decimal> {
        let raw = self.transaction_fee.to_i128()?;
        Decimal::try_from_i128_with_scale(raw, self.from_currency.decimals()).ok()
    }

    /// Check the domain rules the record itself does not enforce
    ///
    /// Reports the first violation found. Construction, setters and
    /// deserialization never call this.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.from_currency == self.to_currency {
            return Err(OrderValidationError::SameCurrency(
                self.from_currency.symbol().to_string(),
            ));
        }

        for (field, amount) in [
            ("depositAmount", self.deposit_amount),
            ("withdrawalAmount", self.withdrawal_amount),
        ] {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(OrderValidationError::NegativeAmount { field });
            }
        }

        if !self.exchange_rate.is_finite() || self.exchange_rate <= 0.0 {
            return Err(OrderValidationError::InvalidRate);
        }

        if self.transaction_fee.sign() == num_bigint::Sign::Minus {
            return Err(OrderValidationError::NegativeFee {
                field: "transactionFee",
            });
        }
        if self.network_fee.is_sign_negative() && !self.network_fee.is_zero() {
            return Err(OrderValidationError::NegativeFee {
                field: "networkFee",
            });
        }

        Ok(())
    }
}

/// Text formats have no spelling for NaN or infinity, so refuse them there
/// instead of letting them degrade to `null`. Binary formats carry them as is.
fn serialize_rate<S: Serializer>(rate: &Rate, serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() && !rate.is_finite() {
        return Err(S::Error::custom(format!("non-finite exchange rate {rate}")));
    }
    serializer.serialize_f64(*rate)
}

/// Decimals as strings, refusing any input `Decimal` would have to round
///
/// Past 28 significant digits `Decimal::from_str` quietly rounds, which
/// would hand back a different amount than the one that was sent.
mod exact_decimal {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let text = String::deserialize(deserializer)?;
        Decimal::from_str_exact(&text)
            .map_err(|e| D::Error::custom(format!("inexact decimal {text:?}: {e}")))
    }
}
