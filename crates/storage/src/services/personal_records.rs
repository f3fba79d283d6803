//! Personal-record bookkeeping.
//!
//! Writes happen after an activity is created or edited: for every standard
//! race distance of the sport, the fastest matching attempt is compared with
//! the best stored time and appended when strictly faster. Stored rows are
//! never pruned; the read side keeps the three fastest distinct times per
//! distance.
//!
//! The history read and the record writes are separate statements with no
//! surrounding transaction, so two concurrent edits for the same user and
//! sport can both append a "new best".

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::personal_record::{DistanceRecords, RankedPersonalRecord, SportRecords};
use crate::error::Result;
use crate::models::{Activity, NewPersonalRecord, PersonalRecord, Sport};

/// Slots reported per race distance
pub const RANKED_SLOTS: usize = 3;

/// Source of a user's activity history.
#[async_trait]
pub trait ActivityHistory: Send + Sync {
    /// Activities ordered by distance ascending, then duration ascending.
    async fn list_for_user_and_sport(
        &self,
        user_id: Uuid,
        sport_type: &str,
    ) -> Result<Vec<Activity>>;
}

/// Storage for personal-record rows.
#[async_trait]
pub trait PersonalRecordStore: Send + Sync {
    async fn list_for_bucket(
        &self,
        user_id: Uuid,
        sport_type: &str,
        distance_bucket: Decimal,
    ) -> Result<Vec<PersonalRecord>>;

    async fn insert(&self, record: &NewPersonalRecord) -> Result<PersonalRecord>;
}

/// Re-evaluates every race distance of `sport_type` for `user_id`.
///
/// `session_id` names the session whose edit triggered the run and is only
/// logged. Unknown sports and empty histories are no-ops. Storage errors are
/// returned as-is. The caller must already have checked that the user owns
/// the activity that triggered the call.
#[tracing::instrument(skip(activities, records))]
pub async fn recompute_personal_records<A, R>(
    activities: &A,
    records: &R,
    user_id: Uuid,
    sport_type: &str,
    session_id: Option<Uuid>,
) -> Result<()>
where
    A: ActivityHistory + ?Sized,
    R: PersonalRecordStore + ?Sized,
{
    let Some(sport) = Sport::from_name(sport_type) else {
        tracing::debug!("No race distances for sport type, nothing to recompute");
        return Ok(());
    };

    let history = activities
        .list_for_user_and_sport(user_id, sport.as_str())
        .await?;
    if history.is_empty() {
        return Ok(());
    }

    for &bucket in sport.distance_buckets() {
        let Some(best) = best_attempt(&history, sport, bucket) else {
            continue;
        };

        let stored = records
            .list_for_bucket(user_id, sport.as_str(), bucket)
            .await?;

        if !beats_stored(best.duration_seconds, &stored) {
            tracing::debug!(
                %bucket,
                duration_seconds = best.duration_seconds,
                "Best attempt does not improve on stored record"
            );
            continue;
        }

        let record = records
            .insert(&NewPersonalRecord {
                user_id,
                session_id: best.session_id,
                activity_id: best.activity_id,
                sport_type: sport.as_str().to_string(),
                distance_bucket: bucket,
                best_time_seconds: best.duration_seconds,
            })
            .await?;

        tracing::info!(
            record_id = %record.record_id,
            activity_id = %best.activity_id,
            %bucket,
            best_time_seconds = best.duration_seconds,
            "New personal record"
        );
    }

    Ok(())
}

/// Fastest activity within tolerance of `bucket`, first in history order on
/// ties.
pub fn best_attempt(history: &[Activity], sport: Sport, bucket: Decimal) -> Option<&Activity> {
    history
        .iter()
        .filter(|activity| sport.matches_bucket(activity.distance, bucket))
        .min_by_key(|activity| activity.duration_seconds)
}

/// True when there is nothing stored yet or `duration_seconds` is strictly
/// faster than every stored time.
pub fn beats_stored(duration_seconds: i32, stored: &[PersonalRecord]) -> bool {
    stored
        .iter()
        .map(|record| record.best_time_seconds)
        .min()
        .is_none_or(|best| duration_seconds < best)
}

/// Three fastest distinct times of one bucket, ranked from 1.
///
/// Equal times share a single slot, held by the earliest stored row.
pub fn top_distinct_times(records: &[PersonalRecord]) -> Vec<RankedPersonalRecord> {
    let mut sorted: Vec<&PersonalRecord> = records.iter().collect();
    sorted.sort_by_key(|record| (record.best_time_seconds, record.created_at));
    sorted.dedup_by_key(|record| record.best_time_seconds);

    sorted
        .into_iter()
        .take(RANKED_SLOTS)
        .zip(1u8..)
        .map(|(record, rank)| RankedPersonalRecord {
            rank,
            record_id: record.record_id,
            activity_id: record.activity_id,
            session_id: record.session_id,
            best_time_seconds: record.best_time_seconds,
            record_date: record.record_date,
        })
        .collect()
}

/// Groups a user's stored records of one sport by race distance, in the
/// sport's distance order. Distances without records are left out.
pub fn rank_sport_records(sport: Sport, records: &[PersonalRecord]) -> SportRecords {
    let distances = sport
        .distance_buckets()
        .iter()
        .filter_map(|&bucket| {
            let in_bucket: Vec<PersonalRecord> = records
                .iter()
                .filter(|record| record.distance_bucket == bucket)
                .cloned()
                .collect();

            if in_bucket.is_empty() {
                return None;
            }

            Some(DistanceRecords {
                distance_bucket: bucket,
                records: top_distinct_times(&in_bucket),
            })
        })
        .collect();

    SportRecords { sport, distances }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;
    use std::sync::Mutex;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn timestamp(offset_seconds: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(offset_seconds)
    }

    fn activity(user_id: Uuid, sport: Sport, distance: &str, duration_seconds: i32) -> Activity {
        Activity {
            activity_id: Uuid::new_v4(),
            user_id,
            session_id: Uuid::new_v4(),
            sport_type: sport.as_str().to_string(),
            duration_seconds,
            distance: dec(distance),
            heart_rate_min: None,
            heart_rate_max: None,
            heart_rate_avg: None,
            cadence: None,
            power: None,
            created_at: timestamp(0),
        }
    }

    fn stored(user_id: Uuid, sport: Sport, bucket: &str, time: i32, age: i64) -> PersonalRecord {
        PersonalRecord {
            record_id: Uuid::new_v4(),
            user_id,
            session_id: Uuid::new_v4(),
            activity_id: Uuid::new_v4(),
            sport_type: sport.as_str().to_string(),
            distance_bucket: dec(bucket),
            best_time_seconds: time,
            record_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            created_at: timestamp(age),
        }
    }

    /// Mirrors the ordering and filtering of the Postgres repositories.
    #[derive(Default)]
    struct InMemoryStore {
        activities: Vec<Activity>,
        records: Mutex<Vec<PersonalRecord>>,
    }

    impl InMemoryStore {
        fn with_activities(activities: Vec<Activity>) -> Self {
            Self {
                activities,
                ..Default::default()
            }
        }

        fn records(&self) -> Vec<PersonalRecord> {
            self.records.lock().unwrap().clone()
        }

        fn records_for(&self, bucket: &str) -> Vec<i32> {
            self.records()
                .into_iter()
                .filter(|record| record.distance_bucket == dec(bucket))
                .map(|record| record.best_time_seconds)
                .collect()
        }
    }

    #[async_trait]
    impl ActivityHistory for InMemoryStore {
        async fn list_for_user_and_sport(
            &self,
            user_id: Uuid,
            sport_type: &str,
        ) -> Result<Vec<Activity>> {
            let mut matching: Vec<Activity> = self
                .activities
                .iter()
                .filter(|a| a.user_id == user_id && a.sport_type == sport_type)
                .cloned()
                .collect();
            matching.sort_by(|a, b| {
                a.distance
                    .cmp(&b.distance)
                    .then(a.duration_seconds.cmp(&b.duration_seconds))
            });
            Ok(matching)
        }
    }

    #[async_trait]
    impl PersonalRecordStore for InMemoryStore {
        async fn list_for_bucket(
            &self,
            user_id: Uuid,
            sport_type: &str,
            distance_bucket: Decimal,
        ) -> Result<Vec<PersonalRecord>> {
            Ok(self
                .records()
                .into_iter()
                .filter(|r| {
                    r.user_id == user_id
                        && r.sport_type == sport_type
                        && r.distance_bucket == distance_bucket
                })
                .collect())
        }

        async fn insert(&self, record: &NewPersonalRecord) -> Result<PersonalRecord> {
            let mut records = self.records.lock().unwrap();
            let created = PersonalRecord {
                record_id: Uuid::new_v4(),
                user_id: record.user_id,
                session_id: record.session_id,
                activity_id: record.activity_id,
                sport_type: record.sport_type.clone(),
                distance_bucket: record.distance_bucket,
                best_time_seconds: record.best_time_seconds,
                record_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                created_at: timestamp(records.len() as i64),
            };
            records.push(created.clone());
            Ok(created)
        }
    }

    #[tokio::test]
    async fn test_picks_fastest_attempt_within_tolerance() {
        let user = Uuid::new_v4();
        let slower = activity(user, Sport::Run, "5.00", 1200);
        let faster = activity(user, Sport::Run, "5.005", 1100);
        let faster_id = faster.activity_id;
        let faster_session = faster.session_id;
        let store = InMemoryStore::with_activities(vec![slower, faster]);

        recompute_personal_records(&store, &store, user, "run", Some(faster_session))
            .await
            .unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distance_bucket, dec("5"));
        assert_eq!(records[0].best_time_seconds, 1100);
        assert_eq!(records[0].activity_id, faster_id);
        assert_eq!(records[0].session_id, faster_session);
    }

    #[tokio::test]
    async fn test_no_record_for_unmatched_buckets() {
        let user = Uuid::new_v4();
        let store = InMemoryStore::with_activities(vec![
            activity(user, Sport::Run, "5.015", 1300),
            activity(user, Sport::Run, "7.5", 2400),
            activity(user, Sport::Run, "10.0", 2700),
        ]);

        recompute_personal_records(&store, &store, user, "run", None)
            .await
            .unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].distance_bucket, dec("10"));
    }

    #[tokio::test]
    async fn test_inserts_only_when_strictly_faster() {
        let user = Uuid::new_v4();

        let store = InMemoryStore::with_activities(vec![activity(user, Sport::Run, "5", 1150)]);
        store
            .records
            .lock()
            .unwrap()
            .push(stored(user, Sport::Run, "5", 1200, 0));
        recompute_personal_records(&store, &store, user, "run", None)
            .await
            .unwrap();
        assert_eq!(store.records_for("5"), vec![1200, 1150]);

        let store = InMemoryStore::with_activities(vec![activity(user, Sport::Run, "5", 1250)]);
        store
            .records
            .lock()
            .unwrap()
            .push(stored(user, Sport::Run, "5", 1200, 0));
        recompute_personal_records(&store, &store, user, "run", None)
            .await
            .unwrap();
        assert_eq!(store.records_for("5"), vec![1200]);
    }

    #[tokio::test]
    async fn test_equal_time_is_not_an_improvement() {
        let user = Uuid::new_v4();
        let store = InMemoryStore::with_activities(vec![activity(user, Sport::Bike, "20", 2400)]);
        store
            .records
            .lock()
            .unwrap()
            .push(stored(user, Sport::Bike, "20", 2400, 0));

        recompute_personal_records(&store, &store, user, "bike", None)
            .await
            .unwrap();

        assert_eq!(store.records_for("20"), vec![2400]);
    }

    #[tokio::test]
    async fn test_swim_buckets_compare_logged_distance() {
        let user = Uuid::new_v4();
        let store = InMemoryStore::with_activities(vec![
            activity(user, Sport::Swim, "0.105", 110),
            activity(user, Sport::Swim, "0.115", 100),
            activity(user, Sport::Swim, "200", 200),
        ]);

        recompute_personal_records(&store, &store, user, "swim", None)
            .await
            .unwrap();

        assert_eq!(store.records_for("0.1"), vec![110]);
        assert!(store.records_for("0.2").is_empty());
    }

    #[tokio::test]
    async fn test_old_sport_record_survives_sport_change() {
        let user = Uuid::new_v4();
        // Logged as a 10 km run, since edited into a 10 km ride.
        let edited = activity(user, Sport::Bike, "10", 1500);
        let store = InMemoryStore::with_activities(vec![edited.clone()]);
        let mut run_record = stored(user, Sport::Run, "10", 1500, 0);
        run_record.activity_id = edited.activity_id;
        store.records.lock().unwrap().push(run_record.clone());

        recompute_personal_records(&store, &store, user, "bike", Some(edited.session_id))
            .await
            .unwrap();
        recompute_personal_records(&store, &store, user, "run", Some(edited.session_id))
            .await
            .unwrap();

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.record_id == run_record.record_id));
        let bike: Vec<&PersonalRecord> = records
            .iter()
            .filter(|r| r.sport_type == "bike")
            .collect();
        assert_eq!(bike.len(), 1);
        assert_eq!(bike[0].activity_id, edited.activity_id);
        assert_eq!(bike[0].best_time_seconds, 1500);
    }

    #[tokio::test]
    async fn test_recompute_after_delete_restores_next_best() {
        let user = Uuid::new_v4();
        let kept = activity(user, Sport::Run, "5", 1300);
        let kept_id = kept.activity_id;
        // The 1200 s attempt and its record were removed together.
        let store = InMemoryStore::with_activities(vec![kept]);
        store
            .records
            .lock()
            .unwrap()
            .push(stored(user, Sport::Run, "5", 1400, 0));

        recompute_personal_records(&store, &store, user, "run", None)
            .await
            .unwrap();

        let mut times = store.records_for("5");
        times.sort();
        assert_eq!(times, vec![1300, 1400]);
        assert!(store.records().iter().any(|r| r.activity_id == kept_id));
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let user = Uuid::new_v4();
        let store = InMemoryStore::with_activities(vec![
            activity(user, Sport::Run, "5", 1250),
            activity(user, Sport::Run, "21.1", 5900),
            activity(user, Sport::Run, "42.2", 12600),
        ]);

        recompute_personal_records(&store, &store, user, "run", None)
            .await
            .unwrap();
        let after_first = store.records().len();
        recompute_personal_records(&store, &store, user, "run", None)
            .await
            .unwrap();

        assert_eq!(after_first, 3);
        assert_eq!(store.records().len(), after_first);
    }

    #[tokio::test]
    async fn test_unknown_sport_and_empty_history_are_noops() {
        let user = Uuid::new_v4();
        let store = InMemoryStore::with_activities(vec![activity(user, Sport::Run, "5", 1250)]);

        recompute_personal_records(&store, &store, user, "rowing", None)
            .await
            .unwrap();
        recompute_personal_records(&store, &store, user, "bike", None)
            .await
            .unwrap();
        recompute_personal_records(&store, &store, Uuid::new_v4(), "run", None)
            .await
            .unwrap();

        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_other_users_are_ignored() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let store = InMemoryStore::with_activities(vec![
            activity(user, Sport::Run, "10", 3000),
            activity(other, Sport::Run, "10", 2500),
        ]);

        recompute_personal_records(&store, &store, user, "run", None)
            .await
            .unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, user);
        assert_eq!(records[0].best_time_seconds, 3000);
    }

    #[test]
    fn test_best_attempt_prefers_first_on_ties() {
        let user = Uuid::new_v4();
        let history = vec![
            activity(user, Sport::Run, "4.995", 1180),
            activity(user, Sport::Run, "5.004", 1180),
        ];
        let best = best_attempt(&history, Sport::Run, dec("5")).unwrap();
        assert_eq!(best.activity_id, history[0].activity_id);
    }

    #[test]
    fn test_beats_stored() {
        let user = Uuid::new_v4();
        assert!(beats_stored(1500, &[]));
        let existing = vec![
            stored(user, Sport::Run, "5", 1300, 0),
            stored(user, Sport::Run, "5", 1200, 1),
        ];
        assert!(beats_stored(1199, &existing));
        assert!(!beats_stored(1200, &existing));
        assert!(!beats_stored(1250, &existing));
    }

    #[test]
    fn test_top_distinct_times_collapses_duplicates() {
        let user = Uuid::new_v4();
        let records = vec![
            stored(user, Sport::Run, "5", 1200, 0),
            stored(user, Sport::Run, "5", 1200, 1),
            stored(user, Sport::Run, "5", 1150, 2),
            stored(user, Sport::Run, "5", 1300, 3),
        ];

        let top = top_distinct_times(&records);

        let times: Vec<i32> = top.iter().map(|r| r.best_time_seconds).collect();
        assert_eq!(times, vec![1150, 1200, 1300]);
        let ranks: Vec<u8> = top.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(top[1].record_id, records[0].record_id);
    }

    #[test]
    fn test_top_distinct_times_keeps_three() {
        let user = Uuid::new_v4();
        let records: Vec<PersonalRecord> = [1400, 1350, 1300, 1250, 1200]
            .into_iter()
            .enumerate()
            .map(|(i, time)| stored(user, Sport::Run, "10", time, i as i64))
            .collect();

        let times: Vec<i32> = top_distinct_times(&records)
            .iter()
            .map(|r| r.best_time_seconds)
            .collect();
        assert_eq!(times, vec![1200, 1250, 1300]);
    }

    #[test]
    fn test_rank_sport_records_orders_distances() {
        let user = Uuid::new_v4();
        let records = vec![
            stored(user, Sport::Run, "42.2", 12000, 0),
            stored(user, Sport::Run, "5.000", 1200, 1),
            stored(user, Sport::Run, "5", 1100, 2),
        ];

        let ranked = rank_sport_records(Sport::Run, &records);

        assert_eq!(ranked.sport, Sport::Run);
        let buckets: Vec<Decimal> = ranked.distances.iter().map(|d| d.distance_bucket).collect();
        assert_eq!(buckets, vec![dec("5"), dec("42.2")]);
        assert_eq!(ranked.distances[0].records.len(), 2);
        assert_eq!(ranked.distances[0].records[0].best_time_seconds, 1100);
    }
}
