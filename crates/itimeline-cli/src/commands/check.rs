//! `itimeline check`

use itimeline_core::{NoExpansion, RenderContext, RenderOptions, render_page};

/// Outcome of checking a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Human-readable report, one problem per line plus a summary.
    pub text: String,
    /// Number of dropped options, dropped lines and degraded end dates.
    pub problems: usize,
}

/// Renders `page` silently and reports everything validation dropped.
pub fn check(page: &str, options: RenderOptions) -> CheckReport {
    let mut ctx = RenderContext::new(options);
    render_page(&mut ctx, page, &NoExpansion);

    let mut text = String::new();
    let mut problems = 0;
    let mut events = 0;

    for report in ctx.reports() {
        events += report.events;
        for rejection in &report.diagnostics {
            problems += 1;
            text.push_str(&format!("{}: {}\n", report.element_id, rejection));
        }
    }

    text.push_str(&format!(
        "{} timeline(s), {} event(s), {} problem(s)\n",
        ctx.reports().len(),
        events,
        problems
    ));

    CheckReport { text, problems }
}

#[cfg(test)]
mod tests {
    use itimeline_core::EndDatePolicy;

    use super::*;

    const PAGE: &str = "\
<itimeline width=wide>
2024-01-01|Fine
2024-02-30/whenever|Degraded
broken line
</itimeline>
<itimeline>
2024-05-01|Also fine
</itimeline>
";

    #[test]
    fn clean_page_has_no_problems() {
        let report = check("<itimeline>\n2024-01-01|Ok\n</itimeline>", RenderOptions::default());
        assert_eq!(report.problems, 0);
        assert_eq!(report.text, "1 timeline(s), 1 event(s), 0 problem(s)\n");
    }

    #[test]
    fn problems_are_listed_per_timeline() {
        let report = check(PAGE, RenderOptions::default());
        assert_eq!(report.problems, 3);
        assert_eq!(
            report.text,
            "\
itimeline-1: option `width`: invalid css-size value \"wide\"
itimeline-1: line 3: invalid end date \"whenever\", kept as a point event
itimeline-1: line 4: expected 2 or 3 `|`-separated fields, found 1
2 timeline(s), 3 event(s), 3 problem(s)
"
        );
    }

    #[test]
    fn strict_end_dates_change_the_count() {
        let options = RenderOptions::default().with_end_dates(EndDatePolicy::RejectLine);
        let report = check(PAGE, options);
        assert_eq!(report.problems, 3);
        assert!(report.text.contains("line 3: invalid end date \"whenever\"\n"));
        assert!(report.text.ends_with("2 timeline(s), 2 event(s), 3 problem(s)\n"));
    }
}
