//! CarService tests over the in-memory store

use chrono::NaiveDate;
use core_kernel::{CarId, DomainError, OwnerId};
use rust_decimal_macros::dec;
use std::sync::Arc;

use domain_motor::{
    CarHistoryEvent, CarRegistration, CarService, ClaimSubmission, PolicyApplication,
};
use test_utils::{CarBuilder, ClaimBuilder, InMemoryMotorStore, PolicyBuilder, TemporalFixtures};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (Arc<InMemoryMotorStore>, CarService, OwnerId) {
    let store = Arc::new(InMemoryMotorStore::new());
    let owner_id = store.seed_owner("Dan Georgescu", Some("dan@example.com"));
    let service = CarService::new(store.clone());
    (store, service, owner_id)
}

fn registration(owner_id: OwnerId, vin: &str) -> CarRegistration {
    CarRegistration {
        vin: vin.to_string(),
        make: Some("Dacia".to_string()),
        model: Some("Logan".to_string()),
        year_of_manufacture: 2018,
        owner_id,
    }
}

mod car_creation {
    use super::*;

    #[tokio::test]
    async fn creates_car_with_owner_details() {
        let (_, service, owner_id) = setup();

        let created = service
            .create_car(registration(owner_id, "1HGBH41JXMN109186"))
            .await
            .unwrap();

        assert!(created.car.id.is_positive());
        assert_eq!(created.car.vin, "1HGBH41JXMN109186");
        assert_eq!(created.owner.name, "Dan Georgescu");
    }

    #[tokio::test]
    async fn rejects_short_and_long_vins() {
        let (_, service, owner_id) = setup();

        for vin in ["1HGBH41JXMN10918", "1HGBH41JXMN1091867"] {
            let err = service
                .create_car(registration(owner_id, vin))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput { field: "Vin", .. }));
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_vin_as_conflict() {
        let (_, service, owner_id) = setup();
        service
            .create_car(registration(owner_id, "1HGBH41JXMN109186"))
            .await
            .unwrap();

        let err = service
            .create_car(registration(owner_id, "1HGBH41JXMN109186"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn rejects_year_outside_bounds() {
        let (_, service, owner_id) = setup();
        let mut request = registration(owner_id, "1HGBH41JXMN109186");
        request.year_of_manufacture = 1899;

        let err = service.create_car(request).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidInput {
                field: "YearOfManufacture",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_owner() {
        let (_, service, _) = setup();

        let err = service
            .create_car(registration(OwnerId::new(999), "1HGBH41JXMN109186"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "Owner", id: 999 }));
    }
}

mod policy_creation {
    use super::*;

    async fn car_with_policy(
        service: &CarService,
        store: &InMemoryMotorStore,
        owner_id: OwnerId,
    ) -> CarId {
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());
        service
            .create_policy(
                car_id,
                PolicyApplication {
                    provider: "Allianz".to_string(),
                    start_date: TemporalFixtures::days_ago(30),
                    end_date: TemporalFixtures::days_ahead(335),
                },
            )
            .await
            .unwrap();
        car_id
    }

    #[tokio::test]
    async fn rejects_overlapping_coverage_as_conflict() {
        let (store, service, owner_id) = setup();
        let car_id = car_with_policy(&service, &store, owner_id).await;

        let err = service
            .create_policy(
                car_id,
                PolicyApplication {
                    provider: "Groupama".to_string(),
                    start_date: TemporalFixtures::days_ahead(300),
                    end_date: TemporalFixtures::days_ahead(700),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn accepts_adjacent_coverage() {
        let (store, service, owner_id) = setup();
        let car_id = car_with_policy(&service, &store, owner_id).await;

        // Starts the day after the existing policy ends.
        let policy = service
            .create_policy(
                car_id,
                PolicyApplication {
                    provider: "Groupama".to_string(),
                    start_date: TemporalFixtures::days_ahead(336),
                    end_date: TemporalFixtures::days_ahead(700),
                },
            )
            .await
            .unwrap();

        assert_eq!(policy.start_date, TemporalFixtures::days_ahead(336));
    }

    #[tokio::test]
    async fn created_policy_is_persisted() {
        use domain_motor::ports::MotorStore;

        let (store, service, owner_id) = setup();
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());

        let policy = service
            .create_policy(
                car_id,
                PolicyApplication {
                    provider: "Allianz".to_string(),
                    start_date: TemporalFixtures::days_ago(30),
                    end_date: TemporalFixtures::days_ahead(335),
                },
            )
            .await
            .unwrap();

        assert!(store.policy_exists(policy.id).await.unwrap());
    }

    #[tokio::test]
    async fn rejects_blank_provider() {
        let (store, _, owner_id) = setup();
        let service = CarService::new(store.clone());
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());

        let err = service
            .create_policy(
                car_id,
                PolicyApplication {
                    provider: "  ".to_string(),
                    start_date: TemporalFixtures::days_ago(30),
                    end_date: TemporalFixtures::days_ahead(335),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput { field: "Provider", .. }));
    }

    #[tokio::test]
    async fn rejects_inverted_dates_and_past_end() {
        let (store, _, owner_id) = setup();
        let service = CarService::new(store.clone());
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());

        let err = service
            .create_policy(
                car_id,
                PolicyApplication {
                    provider: "Allianz".to_string(),
                    start_date: TemporalFixtures::days_ahead(10),
                    end_date: TemporalFixtures::days_ahead(10),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "StartDate", .. }));

        let err = service
            .create_policy(
                car_id,
                PolicyApplication {
                    provider: "Allianz".to_string(),
                    start_date: TemporalFixtures::days_ago(30),
                    end_date: TemporalFixtures::days_ago(1),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "EndDate", .. }));
    }

    #[tokio::test]
    async fn rejects_unknown_car() {
        let (_, service, _) = setup();

        let err = service
            .create_policy(
                CarId::new(42),
                PolicyApplication {
                    provider: "Allianz".to_string(),
                    start_date: TemporalFixtures::days_ago(30),
                    end_date: TemporalFixtures::days_ahead(335),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "Car", .. }));
    }
}

mod claims {
    use super::*;

    #[tokio::test]
    async fn registers_claim_with_generated_id() {
        let (store, service, owner_id) = setup();
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());

        let claim = service
            .register_claim(
                car_id,
                ClaimSubmission {
                    claim_date: TemporalFixtures::days_ago(2),
                    description: "Cracked windshield".to_string(),
                    amount: dec!(320.40),
                },
            )
            .await
            .unwrap();

        assert!(claim.id.is_positive());
        assert_eq!(store.claims().len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_claim_fields() {
        let (store, service, owner_id) = setup();
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());

        let err = service
            .register_claim(
                car_id,
                ClaimSubmission {
                    claim_date: TemporalFixtures::days_ago(1),
                    description: "  ".to_string(),
                    amount: dec!(100),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "Description", .. }));

        let err = service
            .register_claim(
                car_id,
                ClaimSubmission {
                    claim_date: TemporalFixtures::days_ago(1),
                    description: "Dent".to_string(),
                    amount: dec!(0),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "Amount", .. }));

        let err = service
            .register_claim(
                car_id,
                ClaimSubmission {
                    claim_date: TemporalFixtures::days_ahead(1),
                    description: "Dent".to_string(),
                    amount: dec!(100),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "ClaimDate", .. }));
    }
}

mod validity {
    use super::*;

    #[tokio::test]
    async fn covered_on_boundary_days_inclusive() {
        let (store, service, owner_id) = setup();
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());
        store.seed_policy(
            PolicyBuilder::new(car_id)
                .with_dates(date(2024, 1, 1), date(2024, 12, 31))
                .build(),
        );

        assert!(service.is_insurance_valid(car_id, date(2024, 1, 1)).await.unwrap());
        assert!(service.is_insurance_valid(car_id, date(2024, 12, 31)).await.unwrap());
        assert!(service.is_insurance_valid(car_id, date(2024, 6, 15)).await.unwrap());
        assert!(!service.is_insurance_valid(car_id, date(2025, 1, 1)).await.unwrap());
        assert!(!service.is_insurance_valid(car_id, date(2023, 12, 31)).await.unwrap());
    }

    #[tokio::test]
    async fn rejects_out_of_bounds_dates() {
        let (store, service, owner_id) = setup();
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());

        let err = service
            .is_insurance_valid(car_id, date(1899, 12, 31))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "date", .. }));

        let err = service
            .is_insurance_valid(car_id, TemporalFixtures::today() + chrono::Duration::days(365 * 51))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "date", .. }));
    }

    #[tokio::test]
    async fn rejects_missing_car_and_non_positive_id() {
        let (_, service, _) = setup();

        let err = service
            .is_insurance_valid(CarId::new(7), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Car", id: 7 }));

        let err = service
            .is_insurance_valid(CarId::new(0), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "CarId", .. }));
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn merged_history_is_ascending() {
        let (store, service, owner_id) = setup();
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());
        store.seed_policy(
            PolicyBuilder::new(car_id)
                .with_dates(date(2024, 1, 5), date(2024, 12, 25))
                .build(),
        );
        let claim = ClaimBuilder::new(car_id)
            .with_date(date(2024, 3, 1))
            .with_description("Windshield")
            .build();
        store_claim(&store, claim).await;

        let events = service.car_history(car_id).await.unwrap();

        assert_eq!(events.len(), 3);
        let dates: Vec<NaiveDate> = events.iter().map(CarHistoryEvent::date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn history_for_unknown_car_is_not_found() {
        let (_, service, _) = setup();
        let err = service.car_history(CarId::new(5)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Car", .. }));
    }

    async fn store_claim(store: &InMemoryMotorStore, claim: domain_motor::NewClaim) {
        use domain_motor::ports::MotorStore;
        store.insert_claim(claim).await.unwrap();
    }
}

mod outages {
    use super::*;

    #[tokio::test]
    async fn storage_outage_surfaces_as_transient_error() {
        let (store, service, owner_id) = setup();
        let car_id = store.seed_car(CarBuilder::new(owner_id).build());
        store.set_failing(true);

        let err = service
            .is_insurance_valid(car_id, date(2024, 6, 1))
            .await
            .unwrap_err();

        assert!(err.is_transient());
    }
}
