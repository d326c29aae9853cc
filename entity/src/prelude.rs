pub use super::energy_usage::Entity as EnergyUsage;
pub use super::gym_contribution::Entity as GymContribution;
pub use super::user::Entity as User;
