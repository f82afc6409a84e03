//! Menu command implementations.

mod add;
mod exit;
mod help;
mod register;
mod report;
mod stats;
mod view_all;
mod view_mine;

pub use add::AddCommand;
pub use exit::ExitCommand;
pub use help::{HelpCommand, render_menu};
pub use register::RegisterCommand;
pub use report::ReportCommand;
pub use stats::StatsCommand;
pub use view_all::ViewAllCommand;
pub use view_mine::ViewMineCommand;

use std::sync::Arc;

use super::command::CommandRegistry;

/// Registers all built-in commands, in menu order.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(RegisterCommand));
    registry.register(Arc::new(AddCommand));
    registry.register(Arc::new(ViewAllCommand));
    registry.register(Arc::new(ViewMineCommand));
    registry.register(Arc::new(StatsCommand));
    registry.register(Arc::new(ReportCommand));
    registry.register(Arc::new(ExitCommand));
    registry.register(Arc::new(HelpCommand));
}
