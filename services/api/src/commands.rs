use crate::infra::read_profiles;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use talent_discovery::error::AppError;
use talent_discovery::profiles::{ProfileCompletionView, SearchResultView};
use talent_discovery::{search_and_rank_profiles, SearchQuery};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding an array of jobseeker profiles
    #[arg(long)]
    pub(crate) profiles: PathBuf,
    /// Free-text keywords matched against role, skills, and bio
    #[arg(long, default_value = "")]
    pub(crate) keywords: String,
    /// Case-insensitive city filter
    #[arg(long)]
    pub(crate) city: Option<String>,
    #[arg(long)]
    pub(crate) role: Option<String>,
    #[arg(long)]
    pub(crate) skills: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CompletionArgs {
    /// JSON file holding a single profile (or an array; every entry is reported)
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let profiles = read_profiles(&args.profiles)?;
    let query = SearchQuery {
        keywords: args.keywords,
        city: args.city,
        desired_role: args.role,
        skills: args.skills,
        ..SearchQuery::default()
    };

    let results: Vec<SearchResultView> = search_and_rank_profiles(&profiles, &query)
        .into_iter()
        .map(SearchResultView::from)
        .collect();

    let output = json!({ "total": results.len(), "results": results });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) fn run_completion(args: CompletionArgs) -> Result<(), AppError> {
    let profiles = read_profiles(&args.profile)?;
    let views: Vec<ProfileCompletionView> = profiles
        .iter()
        .map(ProfileCompletionView::from_profile)
        .collect();

    let rendered = match views.as_slice() {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    println!("{rendered}");
    Ok(())
}
