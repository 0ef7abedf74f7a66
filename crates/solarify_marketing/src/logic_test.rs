// --- File: crates/solarify_marketing/src/logic_test.rs ---
use crate::logic::{validate_campaign_update, validate_new_campaign, validate_new_post};
use chrono::NaiveDate;
use solarify_db::models::{
    CampaignStatus, NewCampaign, NewSocialPost, PostStatus, SocialPlatform, UpdateCampaign,
};

fn campaign(name: &str) -> NewCampaign {
    NewCampaign {
        name: name.to_string(),
        description: None,
        starts_on: None,
        ends_on: None,
        budget_cents: None,
        status: CampaignStatus::Planned,
    }
}

fn post(content: &str, status: PostStatus) -> NewSocialPost {
    NewSocialPost {
        campaign_id: None,
        platform: SocialPlatform::Instagram,
        content: content.to_string(),
        scheduled_for: None,
        status,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_campaign_name_required() {
    assert!(validate_new_campaign(&campaign("Summer push")).is_ok());
    assert!(validate_new_campaign(&campaign("")).is_err());
}

#[test]
fn test_campaign_budget_must_not_be_negative() {
    let mut c = campaign("Summer push");
    c.budget_cents = Some(0);
    assert!(validate_new_campaign(&c).is_ok());
    c.budget_cents = Some(-1);
    assert!(validate_new_campaign(&c).is_err());
}

#[test]
fn test_campaign_dates_must_be_ordered() {
    let mut c = campaign("Summer push");
    c.starts_on = Some(date(2025, 6, 1));
    c.ends_on = Some(date(2025, 8, 31));
    assert!(validate_new_campaign(&c).is_ok());

    c.ends_on = Some(date(2025, 5, 1));
    assert!(validate_new_campaign(&c).is_err());

    // Same-day campaigns are fine.
    c.ends_on = Some(date(2025, 6, 1));
    assert!(validate_new_campaign(&c).is_ok());
}

#[test]
fn test_campaign_update_checks_provided_fields_only() {
    assert!(validate_campaign_update(&UpdateCampaign::default()).is_ok());
    assert!(validate_campaign_update(&UpdateCampaign {
        budget_cents: Some(-1),
        ..Default::default()
    })
    .is_err());
    assert!(validate_campaign_update(&UpdateCampaign {
        name: Some("  ".to_string()),
        ..Default::default()
    })
    .is_err());
}

#[test]
fn test_post_content_required() {
    assert!(validate_new_post(&post("Go solar this summer!", PostStatus::Draft)).is_ok());
    assert!(validate_new_post(&post("", PostStatus::Draft)).is_err());
}

#[test]
fn test_scheduled_post_needs_a_time() {
    assert!(validate_new_post(&post("Launching soon", PostStatus::Scheduled)).is_err());

    let mut p = post("Launching soon", PostStatus::Scheduled);
    p.scheduled_for = Some(chrono::Utc::now());
    assert!(validate_new_post(&p).is_ok());
}
