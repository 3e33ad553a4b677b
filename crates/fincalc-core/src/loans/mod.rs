pub mod eligibility;
pub mod emi;
pub mod quote;
