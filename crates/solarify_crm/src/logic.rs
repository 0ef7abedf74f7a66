// --- File: crates/solarify_crm/src/logic.rs ---
use serde::{Deserialize, Serialize};
use solarify_common::{validation_error, SolarifyError};
use solarify_db::models::{NewCompany, NewContact, NewOpportunity, OpportunityStage};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Data Structures ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ContactListQuery {
    /// Restrict the listing to contacts of one company
    pub company_id: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct OpportunityListQuery {
    /// Restrict the listing to one pipeline stage
    pub stage: Option<OpportunityStage>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

// --- Validation ---

pub fn validate_new_company(company: &NewCompany) -> Result<(), SolarifyError> {
    if company.name.trim().is_empty() {
        return Err(validation_error("company name must not be empty"));
    }
    Ok(())
}

pub fn validate_new_contact(contact: &NewContact) -> Result<(), SolarifyError> {
    if contact.first_name.trim().is_empty() || contact.last_name.trim().is_empty() {
        return Err(validation_error("contact name must not be empty"));
    }
    if !contact.email.contains('@') {
        return Err(validation_error("contact email is not valid"));
    }
    Ok(())
}

pub fn validate_new_opportunity(opportunity: &NewOpportunity) -> Result<(), SolarifyError> {
    if opportunity.title.trim().is_empty() {
        return Err(validation_error("opportunity title must not be empty"));
    }
    if opportunity.amount_cents < 0 {
        return Err(validation_error("opportunity amount must not be negative"));
    }
    Ok(())
}
