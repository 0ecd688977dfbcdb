use std::fmt::Write as _;

use serde::Serialize;
use tsp_core::{Instance, Tour, TspError};

#[derive(Debug, Serialize)]
pub struct EnumerationReport {
    pub count: usize,
    pub best: Option<Tour>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tours: Vec<Tour>,
    pub millis: f64,
    /// Peak heap growth during the search.
    pub peak_kb: f64,
}

#[derive(Debug, Serialize)]
pub struct BranchBoundReport {
    pub best: Option<Tour>,
    pub expanded: u64,
    pub pruned: u64,
    pub improvements: u64,
    pub millis: f64,
    pub peak_kb: f64,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub nodes: usize,
    pub start: usize,
    pub start_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<(f64, f64)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<EnumerationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_bound: Option<BranchBoundReport>,
}

fn describe_best(
    out: &mut String,
    instance: &Instance,
    title: &str,
    best: Option<&Tour>,
    millis: f64,
    peak_kb: f64,
) -> Result<(), TspError> {
    match best {
        Some(tour) => {
            let path = instance.format_path(&tour.nodes)?;
            let _ = writeln!(out, "Best path ({title}): {path}");
            let _ = writeln!(out, "Best distance: {:.2}", tour.cost);
        }
        None => {
            let _ = writeln!(out, "{title}: No valid path found");
        }
    }
    let _ = writeln!(out, "Time: {millis:.2}ms");
    let _ = writeln!(out, "Memory: {peak_kb:.2}KB");
    Ok(())
}

impl Report {
    pub fn render_text(&self, instance: &Instance) -> Result<String, TspError> {
        let mut out = String::new();
        let _ = writeln!(out, "{} nodes, starting from {}", self.nodes, self.start_label);

        if let Some(e) = &self.enumeration {
            let _ = writeln!(out);
            describe_best(
                &mut out,
                instance,
                "Enumerate",
                e.best.as_ref(),
                e.millis,
                e.peak_kb,
            )?;
            let _ = writeln!(out, "Tours: {}", e.count);
            if !e.tours.is_empty() {
                let _ = writeln!(out, "{:<60} {:>10}", "Path", "Distance");
                for tour in &e.tours {
                    let path = instance.format_path(&tour.nodes)?;
                    let _ = writeln!(out, "{:<60} {:>10.2}", path, tour.cost);
                }
            }
        }

        if let Some(b) = &self.branch_bound {
            let _ = writeln!(out);
            describe_best(
                &mut out,
                instance,
                "Branch-and-bound",
                b.best.as_ref(),
                b.millis,
                b.peak_kb,
            )?;
            let _ = writeln!(
                out,
                "Expanded: {}, pruned: {}, improvements: {}",
                b.expanded, b.pruned, b.improvements
            );
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance::from_json_str(
            r#"{"names": ["A", "B", "C"], "distances": [[0,1,2],[1,0,3],[2,3,0]]}"#,
        )
        .unwrap()
    }

    #[test]
    fn text_lists_tours_and_missing_results() {
        let report = Report {
            nodes: 3,
            start: 0,
            start_label: "A".into(),
            coordinates: None,
            enumeration: Some(EnumerationReport {
                count: 2,
                best: Some(Tour::new(vec![0, 1, 2], 6.0)),
                tours: vec![Tour::new(vec![0, 1, 2], 6.0), Tour::new(vec![0, 2, 1], 6.0)],
                millis: 0.5,
                peak_kb: 1.5,
            }),
            branch_bound: Some(BranchBoundReport {
                best: None,
                expanded: 0,
                pruned: 0,
                improvements: 0,
                millis: 0.1,
                peak_kb: 0.25,
            }),
        };
        let text = report.render_text(&instance()).unwrap();
        assert!(text.contains("Best path (Enumerate): A -> B -> C -> A"));
        assert!(text.contains("Best distance: 6.00"));
        assert!(text.contains("A -> C -> B -> A"));
        assert!(text.contains("Memory: 1.50KB"));
        assert!(text.contains("Branch-and-bound: No valid path found"));
        assert!(text.contains("Memory: 0.25KB"));
    }

    #[test]
    fn text_rejects_tour_outside_instance() {
        let report = Report {
            nodes: 3,
            start: 0,
            start_label: "A".into(),
            coordinates: None,
            enumeration: None,
            branch_bound: Some(BranchBoundReport {
                best: Some(Tour::new(vec![0, 5], 1.0)),
                expanded: 0,
                pruned: 0,
                improvements: 0,
                millis: 0.0,
                peak_kb: 0.0,
            }),
        };
        assert!(matches!(
            report.render_text(&instance()),
            Err(TspError::NodeOutOfRange { node: 5, nodes: 3 })
        ));
    }

    #[test]
    fn json_skips_absent_sections() {
        let report = Report {
            nodes: 3,
            start: 1,
            start_label: "B".into(),
            coordinates: None,
            enumeration: None,
            branch_bound: Some(BranchBoundReport {
                best: Some(Tour::new(vec![1, 0, 2], 6.0)),
                expanded: 4,
                pruned: 1,
                improvements: 1,
                millis: 0.0,
                peak_kb: 2.0,
            }),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("enumeration").is_none());
        assert!(value.get("coordinates").is_none());
        assert_eq!(value["branch_bound"]["best"]["nodes"], serde_json::json!([1, 0, 2]));
        assert_eq!(value["branch_bound"]["peak_kb"], serde_json::json!(2.0));
    }

    #[test]
    fn json_carries_coordinates() {
        let report = Report {
            nodes: 2,
            start: 0,
            start_label: "0".into(),
            coordinates: Some(vec![(0.0, 0.0), (3.0, 4.5)]),
            enumeration: None,
            branch_bound: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["coordinates"], serde_json::json!([[0.0, 0.0], [3.0, 4.5]]));
    }
}
