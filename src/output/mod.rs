mod console;
mod report;
mod sink;

pub use console::render_summary;
pub use report::{build_security_report, SecurityReport};
pub use sink::write_fanout;
