//! The "add plan" controls are appended once, on the first page-ready event.
//! Ready handlers can fire more than once per page, so the count is tracked.

const ADD_PLAN_MARKUP: &str = concat!(
    r#"<div id="addplan">"#,
    r#"<input type="text" id="planname" class="newhidden" />"#,
    r#"<button id="planstartup" class="newhidden">Add plan</button>"#,
    r#"<button id="defaultplan" class="newhidden">Latest run</button>"#,
    "</div>"
);

#[derive(Debug, Default)]
pub struct PlanControls {
    ready_count: usize,
}

impl PlanControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the markup to append on the first call, `None` afterwards.
    /// `banner` is prepended verbatim.
    pub fn on_ready(&mut self, banner: &str) -> Option<String> {
        let first = self.ready_count == 0;
        self.ready_count += 1;
        first.then(|| format!("{}{}", banner, ADD_PLAN_MARKUP))
    }

    pub fn ready_count(&self) -> usize {
        self.ready_count
    }
}
