// Inventory construction: eligibility, grouping and host facts
pub mod types;
pub mod grouping;
pub mod collector;
pub mod resolver;

// Re-export main entry points
pub use collector::build_inventory;
pub use grouping::GroupBy;
pub use resolver::resolve_host;
pub use types::{GuestState, ToolsStatus, VirtualMachineRecord};
