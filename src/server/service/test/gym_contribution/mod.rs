use std::collections::HashMap;

use crate::server::{
    data::gym_contribution::GymContributionRepository,
    error::AppError,
    service::{gym_contribution::GymContributionService, test::fake::FakeTornApi},
    torn::model::GymStat,
};
use chrono::NaiveDate;
use test_utils::builder::TestBuilder;
