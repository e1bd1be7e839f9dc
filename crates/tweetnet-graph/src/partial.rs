//! Per-worker partial results and the final collect/merge step

use tweetnet_core::Accumulator;

use crate::graph::{CoRetweetGraph, Graph, MentionGraph, RetweetGraph};
use crate::record::Record;
use crate::report::{
    CoRetweetReport, CoRetweetReportBuilder, MentionReport, MentionReportBuilder, RetweetReport,
    RetweetReportBuilder,
};

/// Which artifacts a run produces; each toggle is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSelection {
    pub retweet_graph: bool,
    pub retweet_report: bool,
    pub mention_graph: bool,
    pub mention_report: bool,
    pub coretweet_graph: bool,
    pub coretweet_report: bool,
}

impl OutputSelection {
    pub fn all() -> Self {
        Self {
            retweet_graph: true,
            retweet_report: true,
            mention_graph: true,
            mention_report: true,
            coretweet_graph: true,
            coretweet_report: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn count(&self) -> usize {
        [
            self.retweet_graph,
            self.retweet_report,
            self.mention_graph,
            self.mention_report,
            self.coretweet_graph,
            self.coretweet_report,
        ]
        .into_iter()
        .filter(|&on| on)
        .count()
    }
}

/// One worker's accumulators, one per enabled artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial {
    retweet_graph: Option<RetweetGraph>,
    retweet_report: Option<RetweetReportBuilder>,
    mention_graph: Option<MentionGraph>,
    mention_report: Option<MentionReportBuilder>,
    coretweet_graph: Option<CoRetweetGraph>,
    coretweet_report: Option<CoRetweetReportBuilder>,
}

fn enabled<T: Default>(on: bool) -> Option<T> {
    on.then(T::default)
}

fn merge_into<A: Accumulator>(ours: &mut Option<A>, theirs: Option<A>) {
    match (ours.as_mut(), theirs) {
        (Some(ours), Some(theirs)) => ours.merge(theirs),
        (None, Some(theirs)) => *ours = Some(theirs),
        (_, None) => {}
    }
}

fn push_into<A: Accumulator<Item = Record>>(acc: &mut Option<A>, record: &Record) {
    if let Some(acc) = acc {
        acc.push(record);
    }
}

impl Partial {
    pub fn new(selection: OutputSelection) -> Self {
        Self {
            retweet_graph: enabled(selection.retweet_graph),
            retweet_report: enabled(selection.retweet_report),
            mention_graph: enabled(selection.mention_graph),
            mention_report: enabled(selection.mention_report),
            coretweet_graph: enabled(selection.coretweet_graph),
            coretweet_report: enabled(selection.coretweet_report),
        }
    }

    /// Turn accumulators into final graphs and ranked reports.
    pub fn finish(self) -> Artifacts {
        Artifacts {
            retweet_graph: self.retweet_graph.map(RetweetGraph::into_graph),
            retweet_report: self.retweet_report.map(RetweetReportBuilder::finish),
            mention_graph: self.mention_graph.map(MentionGraph::into_graph),
            mention_report: self.mention_report.map(MentionReportBuilder::finish),
            coretweet_graph: self.coretweet_graph.map(CoRetweetGraph::into_graph),
            coretweet_report: self.coretweet_report.map(CoRetweetReportBuilder::finish),
        }
    }
}

impl Accumulator for Partial {
    type Item = Record;

    fn push(&mut self, record: &Record) {
        push_into(&mut self.retweet_graph, record);
        push_into(&mut self.retweet_report, record);
        push_into(&mut self.mention_graph, record);
        push_into(&mut self.mention_report, record);
        push_into(&mut self.coretweet_graph, record);
        push_into(&mut self.coretweet_report, record);
    }

    fn merge(&mut self, other: Self) {
        merge_into(&mut self.retweet_graph, other.retweet_graph);
        merge_into(&mut self.retweet_report, other.retweet_report);
        merge_into(&mut self.mention_graph, other.mention_graph);
        merge_into(&mut self.mention_report, other.mention_report);
        merge_into(&mut self.coretweet_graph, other.coretweet_graph);
        merge_into(&mut self.coretweet_report, other.coretweet_report);
    }
}

/// Merge worker partials in the order given (worker rank order).
///
/// Merging in rank order keeps first-seen order, and therefore report tie
/// order, identical to a single-worker run over the same file list.
pub fn collect(selection: OutputSelection, partials: impl IntoIterator<Item = Partial>) -> Partial {
    let mut merged = Partial::new(selection);
    for partial in partials {
        merged.merge(partial);
    }
    merged
}

/// Final merged outputs; `None` for artifacts that were not requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub retweet_graph: Option<Graph>,
    pub retweet_report: Option<RetweetReport>,
    pub mention_graph: Option<Graph>,
    pub mention_report: Option<MentionReport>,
    pub coretweet_graph: Option<Graph>,
    pub coretweet_report: Option<CoRetweetReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{post, repost};

    fn sample() -> Vec<Record> {
        vec![
            repost("alice", "bob", "10"),
            post("carol", "1", &["bob", "dave"]),
            repost("carol", "bob", "10"),
            repost("dave", "eve", "20"),
            repost("dave", "frank", "30"),
            post("alice", "2", &["bob"]),
            repost("gail", "eve", "20"),
            repost("dave", "bob", "10"),
        ]
    }

    fn fold(selection: OutputSelection, records: &[Record]) -> Partial {
        let mut p = Partial::new(selection);
        for r in records {
            p.push(r);
        }
        p
    }

    #[test]
    fn selection_counts() {
        assert!(OutputSelection::default().is_empty());
        assert_eq!(OutputSelection::all().count(), 6);
        let some = OutputSelection {
            mention_graph: true,
            coretweet_report: true,
            ..Default::default()
        };
        assert_eq!(some.count(), 2);
        assert!(!some.is_empty());
    }

    #[test]
    fn only_selected_artifacts_are_built() {
        let selection = OutputSelection {
            retweet_report: true,
            coretweet_graph: true,
            ..Default::default()
        };
        let artifacts = fold(selection, &sample()).finish();
        assert!(artifacts.retweet_report.is_some());
        assert!(artifacts.coretweet_graph.is_some());
        assert!(artifacts.retweet_graph.is_none());
        assert!(artifacts.mention_graph.is_none());
        assert!(artifacts.mention_report.is_none());
        assert!(artifacts.coretweet_report.is_none());
    }

    #[test]
    fn empty_partial_finishes_to_empty_artifacts() {
        let artifacts = Partial::new(OutputSelection::all()).finish();
        assert!(artifacts.retweet_graph.unwrap().is_empty());
        assert!(artifacts.retweet_report.unwrap().retweets.is_empty());
        assert!(artifacts.coretweet_report.unwrap().coretweets.is_empty());
    }

    #[test]
    fn collect_in_rank_order_equals_single_pass() {
        let records = sample();
        let whole = fold(OutputSelection::all(), &records).finish();
        for split in 0..=records.len() {
            let partials = vec![
                fold(OutputSelection::all(), &records[..split]),
                fold(OutputSelection::all(), &records[split..]),
            ];
            let merged = collect(OutputSelection::all(), partials).finish();
            assert_eq!(merged, whole, "split at {split}");
        }
    }

    #[test]
    fn collect_is_commutative_on_counts() {
        let records = sample();
        let a = fold(OutputSelection::all(), &records[..4]);
        let b = fold(OutputSelection::all(), &records[4..]);
        let ab = collect(OutputSelection::all(), vec![a.clone(), b.clone()]).finish();
        let ba = collect(OutputSelection::all(), vec![b, a]).finish();

        let rt_ab = ab.retweet_report.unwrap();
        let rt_ba = ba.retweet_report.unwrap();
        for user in &rt_ab.retweets {
            let other = rt_ba.user(&user.username).unwrap();
            assert_eq!(user.received_retweets, other.received_retweets);
        }

        let co_ab = ab.coretweet_report.unwrap();
        let co_ba = ba.coretweet_report.unwrap();
        assert_eq!(co_ab.coretweets.len(), co_ba.coretweets.len());
        for pair in &co_ab.coretweets {
            let other = co_ba.pair(&pair.authors.u1, &pair.authors.u2).unwrap();
            assert_eq!(pair.total_coretweets, other.total_coretweets);
        }

        let g_ab = ab.mention_graph.unwrap();
        let g_ba = ba.mention_graph.unwrap();
        for edge in g_ab.edges() {
            assert_eq!(g_ba.weight(edge.source, edge.target), Some(edge.weight));
        }
    }
}
