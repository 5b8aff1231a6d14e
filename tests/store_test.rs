use chrono::NaiveDate;
use tradeplate_recruiter::models::asset::{Asset, AssetStatus, AssetType};
use tradeplate_recruiter::models::candidate::{BankDetails, Candidate, CandidateStatus, DbsStatus};
use tradeplate_recruiter::store::{KvStoreExt, SledStore};
use tradeplate_recruiter::AppData;

fn sample_data() -> AppData {
    let mut data = AppData::seed();

    let mut sarah = Candidate::new();
    sarah.name = "Sarah Jenkins".to_string();
    sarah.email = "sarah.j@example.com".to_string();
    sarah.location = "Manchester".to_string();
    sarah.status = CandidateStatus::Hired;
    sarah.dbs_status = Some(DbsStatus::Valid);
    sarah.dbs_expiry_date = NaiveDate::from_ymd_opt(2025, 6, 15);
    sarah.contract_signed = Some(true);
    sarah.recruiter_id = Some("u-3".to_string());
    sarah.bank_details = Some(BankDetails {
        bank_name: "Barclays".to_string(),
        sort_code: "12-34-56".to_string(),
        account_number: "12345678".to_string(),
        name_on_account: "S Jenkins".to_string(),
    });
    sarah.lat = Some(53.4808);
    sarah.lng = Some(-2.2426);

    let mut plate = Asset::new("TP-299", AssetType::TradePlate);
    plate.status = AssetStatus::Allocated;
    plate.allocated_to_candidate_id = Some(sarah.id.clone());

    data.candidates.push(sarah);
    data.assets.push(plate);
    data.assets.push(Asset::new("TP-305", AssetType::TradePlate));
    data
}

#[test]
fn full_state_survives_a_sled_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let written = sample_data();

    {
        let store = SledStore::open(dir.path()).expect("open");
        written.save(&store).expect("save");
    }

    // reopen from disk, as a fresh session would
    let store = SledStore::open(dir.path()).expect("reopen");
    let loaded = AppData::load(&store).expect("load").expect("seeded");
    assert_eq!(loaded, written);
}

#[test]
fn unseeded_store_loads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SledStore::open(dir.path()).expect("open");
    assert!(AppData::load(&store).expect("load").is_none());
}

#[test]
fn stored_json_uses_the_stable_string_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SledStore::open(dir.path()).expect("open");
    sample_data().save(&store).expect("save");

    let raw: Option<serde_json::Value> = store.get_json("mvm_candidates").expect("get");
    let candidates = raw.expect("key present");
    assert_eq!(candidates[0]["name"], "Sarah Jenkins");
    // nested structures keep the original persisted shape
    assert_eq!(candidates[0]["bankDetails"]["sortCode"], "12-34-56");
    assert_eq!(candidates[0]["dbsStatus"], "Valid");

    let current: Option<String> = store.get_json("mvm_current_user_id").expect("get");
    assert_eq!(current.as_deref(), Some("u-1"));
}
