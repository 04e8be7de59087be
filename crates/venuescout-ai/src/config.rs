/// Tunables for one agent instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Disambiguating qualifier appended to search queries, e.g. a city.
    pub qualifier: String,
    /// Results requested by the first discovery search; later searches widen
    /// the window by the same amount.
    pub discovery_page_size: usize,
    /// Maximum number of discovery searches per request.
    pub discovery_max_searches: usize,
    /// Results requested per follow-up search during enrichment.
    pub follow_up_results: usize,
    /// End a candidate's loop at the first round with no follow-up queries.
    pub stop_when_quiescent: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            qualifier: "Singapore".to_string(),
            discovery_page_size: 10,
            discovery_max_searches: 3,
            follow_up_results: 5,
            stop_when_quiescent: false,
        }
    }
}

impl AgentConfig {
    /// Append the qualifier unless the query already mentions it.
    pub fn qualify(&self, query: &str) -> String {
        let query = query.trim();
        let qualifier = self.qualifier.trim();
        let present = query.to_lowercase().contains(&qualifier.to_lowercase());
        if qualifier.is_empty() || present {
            return query.to_string();
        }
        format!("{query} {qualifier}")
    }
}
