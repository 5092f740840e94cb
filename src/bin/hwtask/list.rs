use hwtask::listing;
use hwtask::targets::project::Project;
use hwtask::theme::Paint;

/// Print the target overview to stdout.
pub fn run(project: &Project) {
    println!("{}", listing::render(project, &Paint::stdout()));
}
