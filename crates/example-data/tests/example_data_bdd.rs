//! Behavioural tests for example-data crate.
//!
//! These tests validate deterministic generation and the constraints every
//! generated record must satisfy before the directory consumes it.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::HashSet;

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
use example_data::{
    ExampleUserRequest, ExampleUserSeed, GenerationError, generate_example_users, is_valid_email,
    is_valid_name,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

/// Test world holding the request and generated users.
#[derive(Default, ScenarioState)]
struct World {
    request: Slot<ExampleUserRequest>,
    generated_users: Slot<Vec<ExampleUserSeed>>,
    second_generation: Slot<Vec<ExampleUserSeed>>,
    failure: Slot<GenerationError>,
}

impl World {
    fn request(&self) -> ExampleUserRequest {
        self.request.get().expect("request should be set")
    }

    fn users(&self) -> Vec<ExampleUserSeed> {
        self.generated_users
            .get()
            .expect("users should be generated")
    }
}

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid reference instant")
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a request for {count:usize} users with seed {seed:u64}")]
fn a_request_for_users(world: &World, count: usize, seed: u64) {
    world
        .request
        .set(ExampleUserRequest::new(seed, count, reference_time()));
}

// ============================================================================
// When steps
// ============================================================================

#[when("users are generated")]
fn users_are_generated(world: &World) {
    let users = generate_example_users(&world.request()).expect("generation succeeds");
    world.generated_users.set(users);
}

#[when("users are generated twice")]
fn users_are_generated_twice(world: &World) {
    let request = world.request();
    let first = generate_example_users(&request).expect("first generation");
    let second = generate_example_users(&request).expect("second generation");

    world.generated_users.set(first);
    world.second_generation.set(second);
}

#[when("generation is attempted")]
fn generation_is_attempted(world: &World) {
    match generate_example_users(&world.request()) {
        Ok(users) => world.generated_users.set(users),
        Err(error) => world.failure.set(error),
    }
}

// ============================================================================
// Then steps
// ============================================================================

#[then("both generations produce identical users")]
fn both_generations_produce_identical_users(world: &World) {
    let second = world
        .second_generation
        .get()
        .expect("second generation should be set");

    assert_eq!(world.users(), second, "Generations should be deterministic");
}

#[then("{count:usize} users are produced")]
fn users_are_produced(world: &World, count: usize) {
    assert_eq!(world.users().len(), count);
}

#[then("all names satisfy backend constraints")]
fn all_names_satisfy_backend_constraints(world: &World) {
    for user in world.users() {
        assert!(is_valid_name(&user.name), "Invalid name: {}", user.name);
    }
}

#[then("all emails are valid and unique")]
fn all_emails_are_valid_and_unique(world: &World) {
    let users = world.users();
    let mut seen = HashSet::new();
    for user in &users {
        assert!(is_valid_email(&user.email), "Invalid email: {}", user.email);
        assert!(seen.insert(user.email.clone()), "Duplicate email: {}", user.email);
    }
}

#[then("identifiers run sequentially from 1")]
fn identifiers_run_sequentially(world: &World) {
    let ids: Vec<u64> = world.users().iter().map(|user| user.id).collect();
    let expected: Vec<u64> = (1..=ids.len())
        .map(|index| u64::try_from(index).expect("index fits u64"))
        .collect();
    assert_eq!(ids, expected);
}

#[then("every registration date falls in 2020")]
fn every_registration_date_falls_in_2020(world: &World) {
    for user in world.users() {
        assert_eq!(user.registration_date.year(), 2020, "user {}", user.id);
    }
}

#[then("every last activity lies within 30 days of the reference time")]
fn every_last_activity_lies_within_window(world: &World) {
    let reference = world.request().reference_time();
    let earliest = reference - TimeDelta::days(30);
    for user in world.users() {
        assert!(
            user.last_activity <= reference && user.last_activity > earliest,
            "last activity out of range for user {}: {}",
            user.id,
            user.last_activity
        );
    }
}

#[then("generation fails with an empty request error")]
fn generation_fails_with_empty_request(world: &World) {
    match world.failure.get() {
        Some(GenerationError::EmptyRequest) => {}
        other => panic!("Expected EmptyRequest, got: {other:?}"),
    }
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Deterministic generation produces identical users"
)]
fn deterministic_generation_produces_identical_users(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Generated users satisfy directory constraints"
)]
fn generated_users_satisfy_directory_constraints(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Generated timestamps stay within their ranges"
)]
fn generated_timestamps_stay_within_their_ranges(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/example_data.feature",
    name = "Empty request is rejected"
)]
fn empty_request_is_rejected(world: World) {
    let _ = world;
}
