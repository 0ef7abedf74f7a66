// --- File: crates/solarify_crm/src/logic_test.rs ---
use crate::logic::{validate_new_company, validate_new_contact, validate_new_opportunity};
use solarify_db::models::{NewCompany, NewContact, NewOpportunity, OpportunityStage};

fn company(name: &str) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        industry: None,
        website: None,
        phone: None,
        address: None,
        notes: None,
    }
}

fn contact(first: &str, last: &str, email: &str) -> NewContact {
    NewContact {
        company_id: None,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: None,
        title: None,
    }
}

fn opportunity(title: &str, amount_cents: i64) -> NewOpportunity {
    NewOpportunity {
        company_id: 1,
        contact_id: None,
        title: title.to_string(),
        stage: OpportunityStage::Lead,
        amount_cents,
        close_date: None,
        notes: None,
    }
}

#[test]
fn test_company_name_required() {
    assert!(validate_new_company(&company("Helios GmbH")).is_ok());
    assert!(validate_new_company(&company("")).is_err());
    assert!(validate_new_company(&company("   ")).is_err());
}

#[test]
fn test_contact_needs_names_and_email() {
    assert!(validate_new_contact(&contact("Ada", "Lovelace", "ada@example.com")).is_ok());
    assert!(validate_new_contact(&contact("", "Lovelace", "ada@example.com")).is_err());
    assert!(validate_new_contact(&contact("Ada", "", "ada@example.com")).is_err());
    assert!(validate_new_contact(&contact("Ada", "Lovelace", "not-an-email")).is_err());
}

#[test]
fn test_opportunity_amount_must_not_be_negative() {
    assert!(validate_new_opportunity(&opportunity("Rooftop array", 0)).is_ok());
    assert!(validate_new_opportunity(&opportunity("Rooftop array", 1_200_000)).is_ok());
    assert!(validate_new_opportunity(&opportunity("Rooftop array", -1)).is_err());
    assert!(validate_new_opportunity(&opportunity("", 100)).is_err());
}
