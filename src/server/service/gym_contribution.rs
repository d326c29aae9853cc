use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::gym_contribution::GymContributionRepository,
    error::AppError,
    model::gym_contribution::GymContribution,
    torn::{model::GymStat, RetryPolicy, TornApi},
};

/// Captures a daily snapshot of faction members' gym energy contributions.
pub struct GymContributionService<'a> {
    db: &'a DatabaseConnection,
    api: &'a dyn TornApi,
    retry: RetryPolicy,
}

impl<'a> GymContributionService<'a> {
    /// Creates a new GymContributionService with the default retry policy.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `api` - Torn API implementation to fetch contributors through
    pub fn new(db: &'a DatabaseConnection, api: &'a dyn TornApi) -> Self {
        Self {
            db,
            api,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy applied to each Torn API call.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetches all four gym stat contributor lists and stores them as `date`'s snapshot.
    ///
    /// Nothing is stored unless all four lists were fetched. Members already captured for
    /// `date` keep their first snapshot.
    ///
    /// # Arguments
    /// - `api_key` - Key with faction API access
    /// - `date` - Day the snapshot is recorded under
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of members newly stored
    /// - `Err(AppError::TornApiErr)` - A contributor list could not be fetched
    /// - `Err(AppError::DbErr)` - Database error while storing the snapshot
    pub async fn update_gym_contributions(
        &self,
        api_key: &str,
        date: NaiveDate,
    ) -> Result<u64, AppError> {
        let api = self.api;
        let mut per_stat = Vec::with_capacity(GymStat::ALL.len());

        for stat in GymStat::ALL {
            let contributed = self
                .retry
                .run("Faction contributors fetch", || {
                    api.fetch_gym_contributors(api_key, stat)
                })
                .await?;

            per_stat.push((stat, contributed));
        }

        let snapshot = merge_contributions(date, per_stat);
        let members = snapshot.len();

        let inserted = GymContributionRepository::new(self.db)
            .save_snapshot(snapshot)
            .await?;

        tracing::info!(
            "Stored gym contributions for {} of {} faction members on {}",
            inserted,
            members,
            date
        );

        Ok(inserted)
    }
}

/// Combines per-stat contribution maps into one row per player.
///
/// A player absent from a stat's map contributed `0` to it.
fn merge_contributions(
    date: NaiveDate,
    per_stat: Vec<(GymStat, HashMap<i64, i64>)>,
) -> Vec<GymContribution> {
    let mut by_player: BTreeMap<i64, GymContribution> = BTreeMap::new();

    for (stat, contributed) in per_stat {
        for (torn_id, amount) in contributed {
            let row = by_player.entry(torn_id).or_insert_with(|| GymContribution {
                torn_id,
                date,
                strength: 0,
                speed: 0,
                defense: 0,
                dexterity: 0,
                total: 0,
            });

            match stat {
                GymStat::Strength => row.strength = amount,
                GymStat::Speed => row.speed = amount,
                GymStat::Defense => row.defense = amount,
                GymStat::Dexterity => row.dexterity = amount,
            }
        }
    }

    by_player
        .into_values()
        .map(|mut row| {
            row.total = row.strength + row.speed + row.defense + row.dexterity;
            row
        })
        .collect()
}
