//! Human-readable overview of the targets and the commands they resolve to

use crate::targets::project::Project;
use crate::targets::target::Target;
use crate::theme::{self, Paint};

/// Render every target with its description and resolved command line.
#[must_use]
pub fn render(project: &Project, paint: &Paint) -> String {
    let width = Target::ALL
        .iter()
        .map(|t| t.name().len())
        .max()
        .unwrap_or_default();

    let mut lines = vec![paint.paint(theme::ACCENT, "Targets:")];
    for target in Target::ALL {
        let name = format!("{:<width$}", target.name());
        lines.push(format!(
            "  {}  {}",
            paint.paint(anstyle::Style::new().bold(), &name),
            target.description()
        ));
        let command = format!("$ {}", target.invocation(project));
        lines.push(format!(
            "  {:width$}  {}",
            "",
            paint.paint(theme::DIM, &command)
        ));
    }
    lines.join("\n")
}
