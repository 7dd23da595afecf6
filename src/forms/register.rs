//! Registration form: one flat set of fields, discriminated by role.

use crate::net::types::{
    AccountFields, BasicRegistration, BusinessType, ClientRegistration, PartnerRegistration, RegisterRequest, Role,
};

use super::{ValidationError, optional, required, validate_email, validate_password};

/// Raw registration input. Only the fields of the selected role are read.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisterForm {
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub phone_number: String,
    pub company_name: String,
    pub business_type: String,
    pub tax_id: String,
    pub commission_rate: f64,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            role: Role::Client,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            shipping_address: String::new(),
            billing_address: String::new(),
            phone_number: String::new(),
            company_name: String::new(),
            business_type: String::new(),
            tax_id: String::new(),
            commission_rate: 0.0,
        }
    }
}

impl RegisterForm {
    /// Check the account fields, then the role's own fields, and build the
    /// registration variant for that role.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let account = self.account()?;
        let request = match self.role {
            Role::Client => RegisterRequest::Client(ClientRegistration {
                account,
                shipping_address: required(&self.shipping_address, "Shipping address")?,
                billing_address: optional(&self.billing_address),
                phone_number: required(&self.phone_number, "Phone number")?,
            }),
            Role::Partner => RegisterRequest::Partner(PartnerRegistration {
                account,
                company_name: required(&self.company_name, "Company name")?,
                business_type: parse_business_type(&self.business_type)?,
                tax_id: required(&self.tax_id, "Tax ID")?,
                commission_rate: check_commission_rate(self.commission_rate)?,
            }),
            Role::Admin => RegisterRequest::Basic(BasicRegistration {
                account,
                role: Role::Admin,
                phone: optional(&self.phone_number),
            }),
        };
        Ok(request)
    }

    fn account(&self) -> Result<AccountFields, ValidationError> {
        let first_name = required(&self.first_name, "First name")?;
        let last_name = required(&self.last_name, "Last name")?;
        let email = validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(AccountFields { first_name, last_name, email, password: self.password.clone() })
    }
}

fn parse_business_type(raw: &str) -> Result<BusinessType, ValidationError> {
    let raw = required(raw, "Business type")?;
    raw.parse()
        .map_err(|_| ValidationError::InvalidBusinessType(raw))
}

fn check_commission_rate(rate: f64) -> Result<f64, ValidationError> {
    if rate.is_nan() || rate <= 0.0 {
        return Err(ValidationError::CommissionRateNotPositive);
    }
    if rate > 100.0 {
        return Err(ValidationError::CommissionRateTooHigh);
    }
    Ok(rate)
}

#[cfg(test)]
#[path = "register_test.rs"]
mod tests;
