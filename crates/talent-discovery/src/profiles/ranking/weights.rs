/// Blend applied to the four sub-scores when computing the aggregate.
pub const DEFAULT_WEIGHTS: RankingWeights = RankingWeights {
    relevance: 0.4,
    completeness: 0.3,
    recency: 0.2,
    discovery: 0.1,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub relevance: f64,
    pub completeness: f64,
    pub recency: f64,
    pub discovery: f64,
}

impl RankingWeights {
    pub fn sum(&self) -> f64 {
        self.relevance + self.completeness + self.recency + self.discovery
    }

    pub(crate) fn combine(&self, relevance: u8, completeness: u8, recency: u8, discovery: u8) -> u8 {
        let weighted = f64::from(relevance) * self.relevance
            + f64::from(completeness) * self.completeness
            + f64::from(recency) * self.recency
            + f64::from(discovery) * self.discovery;
        weighted.round().clamp(0.0, 100.0) as u8
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}
