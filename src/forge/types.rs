/// The parts of a pull request that may reference issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    pub number: u64,
    pub title: String,
    /// Source branch name, e.g. "feature/ABC-6-thing".
    pub head_branch: String,
}
