use super::calldata::{self, REPORT_FELT_LEN};
use super::*;
use routeguard_crypto::selector;
use routeguard_types::{scale_coordinate, ReportStatus};
use std::collections::HashSet;

fn submission(event_type: EventType, latitude: f64, longitude: f64) -> ReportSubmission {
    ReportSubmission {
        commitment: FieldElement::from(0xabcu64),
        latitude: scale_coordinate(latitude).unwrap(),
        longitude: scale_coordinate(longitude).unwrap(),
        event_type,
    }
}

/// What `get_report` returns for a report stored from `call`'s arguments.
fn stored_report(call: &calldata::EncodedCall, regards: u128) -> Vec<FieldElement> {
    let mut felts = call.calldata.clone();
    felts.push(FieldElement::from(ReportStatus::Active.ordinal() as u64));
    felts.push(FieldElement::from(1_760_000_000u64));
    felts.push(FieldElement::ZERO);
    felts.extend(calldata::encode_u256(regards));
    felts
}

#[test]
fn test_submitted_report_reads_back_unchanged() {
    let cases = [
        (EventType::Accident, 19.4326, -99.1332),
        (EventType::RoadClosure, -33.8688, 151.2093),
        (EventType::TrafficJam, -90.0, -180.0),
    ];

    for (event_type, lat, lng) in cases {
        let sent = submission(event_type, lat, lng);
        let call = calldata::submit_report(&sent);
        let felts = stored_report(&call, 0);
        assert_eq!(felts.len(), REPORT_FELT_LEN);

        let report = calldata::decode_report(4, &felts).unwrap();
        assert_eq!(report.report_id, 4);
        assert_eq!(report.commitment, sent.commitment);
        assert_eq!(report.latitude, sent.latitude);
        assert_eq!(report.longitude, sent.longitude);
        assert_eq!(report.event_type, event_type);
        assert_eq!(report.status, ReportStatus::Active);
        assert_eq!(report.submitted_at, 1_760_000_000);
    }
}

#[test]
fn test_regards_amount_reads_back_as_pending_rewards() {
    let amount = 1_500_000_000_000_000_000u128;
    let call = calldata::send_regards(2, amount);
    assert_eq!(call.calldata[0], FieldElement::from(2u64));
    assert_eq!(calldata::decode_pending_rewards(&call.calldata[1..]).unwrap(), amount);

    let felts = stored_report(&calldata::submit_report(&submission(EventType::Hazard, 1.0, 2.0)), amount);
    assert_eq!(calldata::decode_report(0, &felts).unwrap().regards, amount);
}

#[test]
fn test_entry_point_selectors_are_distinct() {
    let calls = [
        calldata::submit_report(&submission(EventType::Protest, 0.0, 0.0)),
        calldata::confirm_report(1),
        calldata::send_regards(1, 1),
        calldata::get_report_count(),
        calldata::get_report(1),
        calldata::get_pending_rewards(&FieldElement::from(1u64)),
        calldata::is_nullifier_used(&FieldElement::from(1u64)),
    ];

    let selectors: HashSet<FieldElement> = calls.iter().map(|c| c.selector).collect();
    assert_eq!(selectors.len(), calls.len());
    for call in &calls {
        assert_eq!(call.selector, selector(call.entry_point));
    }
}

#[test]
fn test_claim_submission_debug_hides_secret() {
    let claim = ClaimSubmission {
        secret: FieldElement::from(0x5ec7e7u64),
        salt: FieldElement::from(0x5a17u64),
        nullifier: FieldElement::from(1u64),
        recipient: FieldElement::from(2u64),
    };
    let dbg = format!("{:?}", claim);
    assert!(!dbg.contains("0x5ec7e7"));
    assert!(!dbg.contains("0x5a17"));
}
