//! Tests for domain records and the role table

use chrono::{TimeZone, Utc};
use kraken_rotation::core::{sort_blocks, BlockKind, JobRole, ProgramBlock, RoleTable};

#[test]
fn test_role_table_indexing() {
    let mut table = RoleTable::new(1, 2, 3, 4);
    assert_eq!(table[JobRole::Qa], 1);
    assert_eq!(table[JobRole::Devops], 4);
    table[JobRole::Backend] += 10;
    assert_eq!(table[JobRole::Backend], 13);
    assert_eq!(table.total(), 20);
}

#[test]
fn test_role_table_entries_follow_canonical_order() {
    let table = RoleTable::new(1, 2, 3, 4);
    let roles: Vec<JobRole> = table.entries().iter().map(|(role, _)| *role).collect();
    assert_eq!(roles, JobRole::ORDER.to_vec());
}

#[test]
fn test_role_table_serde_uses_wire_names() {
    let table = RoleTable::new(3, 3, 3, 1);
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["QA"], 3);
    assert_eq!(json["DEVOPS"], 1);

    let back: RoleTable =
        serde_json::from_str(r#"{"QA":3,"FRONTEND":3,"BACKEND":3,"DEVOPS":1}"#).unwrap();
    assert_eq!(back, table);
}

#[test]
fn test_job_role_serde_and_display() {
    assert_eq!(serde_json::to_string(&JobRole::Devops).unwrap(), "\"DEVOPS\"");
    let role: JobRole = serde_json::from_str("\"FRONTEND\"").unwrap();
    assert_eq!(role, JobRole::Frontend);
    assert_eq!(JobRole::Qa.to_string(), "QA");
}

#[test]
fn test_block_kind_wire_names() {
    assert_eq!(
        serde_json::to_string(&BlockKind::LeaderBlock).unwrap(),
        "\"LEADER_BLOCK\""
    );
    assert_eq!(
        serde_json::to_string(&BlockKind::JuniorBlock).unwrap(),
        "\"JUNIOR_BLOCK\""
    );
}

#[test]
fn test_sort_blocks_orders_by_start_then_kind_then_order() {
    let at = |m: u32| Utc.with_ymd_and_hms(2026, m, 1, 0, 0, 0).unwrap();
    let block = |id: &str, kind: BlockKind, order: u32, month: u32| ProgramBlock {
        id: id.into(),
        program_id: "p1".into(),
        kind,
        order,
        label: id.into(),
        starts_at: at(month),
        ends_at: at(month + 1),
    };

    let mut blocks = vec![
        block("junior-2", BlockKind::JuniorBlock, 2, 3),
        block("junior-1", BlockKind::JuniorBlock, 1, 1),
        block("leader-1", BlockKind::LeaderBlock, 1, 1),
        block("docs", BlockKind::DocsBlock, 1, 10),
        block("leader-2", BlockKind::LeaderBlock, 2, 4),
    ];
    sort_blocks(&mut blocks);

    let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
    // Leader and junior block 1 share a start; the leader block lists first.
    assert_eq!(ids, vec!["leader-1", "junior-1", "junior-2", "leader-2", "docs"]);
}
