/// Resource collections polled on every run, in fetch order.
pub const ENDPOINTS: [&str; 19] = [
    "LegislativeSessions",
    "Measures",
    "Committees",
    "CommitteeMeetings",
    "CommitteeAgendaItems",
    "CommitteeStaffMembers",
    "CommitteeMeetingDocuments",
    "ConveneTimes",
    "FloorSessionAgendaItems",
    "Legislators",
    "MeasureAnalysisDocuments",
    "MeasureDocuments",
    "MeasureHistoryActions",
    "MeasureSponsors",
    "CommitteeProposedAmendments",
    "FloorLetters",
    "CommitteeVotes",
    "MeasureVotes",
    "CommitteeMembers",
];

pub fn default_endpoints() -> Vec<String> {
    ENDPOINTS.iter().map(|e| e.to_string()).collect()
}
