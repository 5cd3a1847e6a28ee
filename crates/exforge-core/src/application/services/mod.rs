//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "preview a plan".

pub mod collision_guard;
pub mod plan_executor;
pub mod scaffold_planner;
pub mod scaffold_service;

pub use collision_guard::CollisionGuard;
pub use plan_executor::{ExecutionReport, ExecutionState, PlanExecutor, StepObserver};
pub use scaffold_planner::ScaffoldPlanner;
pub use scaffold_service::ScaffoldService;
