//! Integration tests for the junior rotation preview.
//!
//! These tests validate:
//! 1. The modular role walk per junior and the per-block role counts
//! 2. Preview preconditions: active program, generated blocks, a single
//!    induction offering, a non-empty cohort
//! 3. That previewing persists nothing

use chrono::{DateTime, Duration, TimeZone, Utc};
use kraken_rotation::config::TeamRules;
use kraken_rotation::core::{
    BlockKind, Enrollment, EnrollmentStatus, JobRole, Program, ProgramStatus, RoleTable,
    RotationError, Track,
};
use kraken_rotation::infra::memory::{InMemoryStore, OfferingLinkRow};
use kraken_rotation::service::{CreateProgram, RotationService, StartProgram};
use kraken_rotation::util::clock::FixedClock;
use kraken_rotation::util::ids::SequenceSource;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

fn service() -> RotationService<InMemoryStore> {
    RotationService::new(InMemoryStore::new(), TeamRules::default())
        .with_clock(Box::new(FixedClock(fixed_now())))
        .with_ids(Box::new(SequenceSource::new("id")))
}

fn link(program_id: &str, kind: Track, offering: &str) -> OfferingLinkRow {
    OfferingLinkRow {
        program_id: program_id.into(),
        kind,
        offering_id: offering.into(),
        teacher_id: "teacher-1".into(),
        term: None,
    }
}

fn junior(id: &str, minutes: i64) -> Enrollment {
    Enrollment {
        id: id.into(),
        offering_id: "off-induccion".into(),
        student_id: format!("student-{id}"),
        track: Track::Induccion,
        status: EnrollmentStatus::Approved,
        primary_role: None,
        pref_role1: None,
        pref_role2: None,
        pref_role3: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap() + Duration::minutes(minutes),
    }
}

fn activated_program(service: &RotationService<InMemoryStore>) -> String {
    let program = service
        .create_program(CreateProgram {
            academic_year: 2026,
            name: "Rotation 2026".into(),
            starts_at: at(2026, 1, 1),
            ends_at: at(2026, 12, 1),
        })
        .unwrap();
    service.store().seed_link(link(&program.id, Track::PracticaInterna, "off-practica"));
    service.store().seed_link(link(&program.id, Track::Induccion, "off-induccion"));
    service.activate_program(&program.id, &StartProgram::default()).unwrap();
    program.id
}

#[test]
fn test_preview_shape_and_role_sequences() {
    let service = service();
    let program_id = activated_program(&service);
    for i in 0..5 {
        service.store().seed_enrollment(junior(&format!("jr-{i}"), i));
    }

    let preview = service.preview_junior_rotation(&program_id).unwrap();

    assert_eq!(preview.program_id, program_id);
    assert_eq!(preview.offering_id, "off-induccion");
    assert_eq!(preview.juniors_total, 5);
    assert_eq!(preview.blocks.len(), 4);
    assert_eq!(preview.plan.len(), 5);

    let orders: Vec<u32> = preview.blocks.iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);

    let mut junior_blocks: Vec<_> = service
        .store()
        .all_blocks()
        .into_iter()
        .filter(|b| b.kind == BlockKind::JuniorBlock)
        .collect();
    junior_blocks.sort_by_key(|b| b.order);
    for (rotation, block) in preview.blocks.iter().zip(&junior_blocks) {
        assert_eq!(rotation.block_id, block.id);
        assert_eq!(rotation.total, 5);
    }

    // Cohort order follows enrollment creation order.
    assert_eq!(preview.plan[0].enrollment_id, "jr-0");
    assert_eq!(preview.plan[0].student_id, "student-jr-0");

    let roles_of = |junior_idx: usize| -> Vec<JobRole> {
        preview.plan[junior_idx].roles.iter().map(|r| r.role).collect()
    };
    assert_eq!(
        roles_of(0),
        vec![JobRole::Qa, JobRole::Frontend, JobRole::Backend, JobRole::Devops]
    );
    assert_eq!(
        roles_of(1),
        vec![JobRole::Frontend, JobRole::Backend, JobRole::Devops, JobRole::Qa]
    );
    assert_eq!(
        roles_of(4),
        vec![JobRole::Qa, JobRole::Frontend, JobRole::Backend, JobRole::Devops]
    );

    // Five juniors walking the offset: the first block doubles up on QA, the
    // second on frontend.
    assert_eq!(preview.blocks[0].counts, RoleTable::new(2, 1, 1, 1));
    assert_eq!(preview.blocks[1].counts, RoleTable::new(1, 2, 1, 1));
    assert_eq!(preview.blocks[2].counts, RoleTable::new(1, 1, 2, 1));
    assert_eq!(preview.blocks[3].counts, RoleTable::new(1, 1, 1, 2));
}

#[test]
fn test_preview_persists_nothing() {
    let service = service();
    let program_id = activated_program(&service);
    service.store().seed_enrollment(junior("jr-0", 0));

    service.preview_junior_rotation(&program_id).unwrap();

    assert!(service.store().teams().is_empty());
    assert!(service.store().memberships().is_empty());
}

#[test]
fn test_requires_an_active_program() {
    let service = service();
    let program = service
        .create_program(CreateProgram {
            academic_year: 2026,
            name: "Rotation 2026".into(),
            starts_at: at(2026, 1, 1),
            ends_at: at(2026, 12, 1),
        })
        .unwrap();

    let err = service.preview_junior_rotation(&program.id).unwrap_err();
    assert!(err.to_string().contains("is not active"));
}

#[test]
fn test_unknown_program_is_not_found() {
    let service = service();
    let err = service.preview_junior_rotation("missing").unwrap_err();
    assert!(matches!(err, RotationError::NotFound(_)));
}

#[test]
fn test_active_program_without_blocks_is_rejected() {
    let service = service();
    service.store().seed_program(Program {
        id: "p-active".into(),
        academic_year: 2026,
        name: "Rotation 2026".into(),
        status: ProgramStatus::Active,
        starts_at: at(2026, 1, 1),
        ends_at: at(2026, 11, 1),
        started_at: Some(fixed_now()),
    });

    let err = service.preview_junior_rotation("p-active").unwrap_err();
    assert!(err.to_string().contains("expected 4 junior blocks, found 0"));
}

#[test]
fn test_requires_approved_juniors() {
    let service = service();
    let program_id = activated_program(&service);

    let err = service.preview_junior_rotation(&program_id).unwrap_err();
    assert!(err.to_string().contains("no approved induction enrollments"));
}

#[test]
fn test_requires_exactly_one_induction_link() {
    let service = service();

    // No induction link at all.
    let lonely = service
        .create_program(CreateProgram {
            academic_year: 2026,
            name: "Practica only".into(),
            starts_at: at(2026, 1, 1),
            ends_at: at(2026, 12, 1),
        })
        .unwrap();
    service.store().seed_link(link(&lonely.id, Track::PracticaInterna, "off-practica"));
    service.activate_program(&lonely.id, &StartProgram::default()).unwrap();
    let err = service.preview_junior_rotation(&lonely.id).unwrap_err();
    assert!(matches!(err, RotationError::NotFound(_)));
    assert!(err.to_string().contains("no induction offering"));

    // Two induction links are ambiguous.
    let crowded = service
        .create_program(CreateProgram {
            academic_year: 2026,
            name: "Two inductions".into(),
            starts_at: at(2026, 1, 1),
            ends_at: at(2026, 12, 1),
        })
        .unwrap();
    service.store().seed_link(link(&crowded.id, Track::Induccion, "off-a"));
    service.store().seed_link(link(&crowded.id, Track::Induccion, "off-b"));
    service.activate_program(&crowded.id, &StartProgram::default()).unwrap();
    let err = service.preview_junior_rotation(&crowded.id).unwrap_err();
    assert!(err.to_string().contains("multiple induction offerings"));
}
