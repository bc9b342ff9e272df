//! Git metadata used when building a manifest
//!
//! `armory manifest build` falls back to the enclosing repository for anything not
//! passed on the command line:
//! - `repo` from `remote.origin.url`
//! - `ref` from the `HEAD` commit id
//! - `generatedAt` from the `HEAD` commit time

pub mod url;

use std::path::Path;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use git2::Repository;

use crate::error::{Result, git as git_err};

/// Open the repository containing `root`
pub fn open(root: &Path) -> Result<Repository> {
    Repository::discover(root).map_err(|e| {
        git_err::operation_failed(format!(
            "no git repository at {}: {}",
            root.display(),
            e.message()
        ))
    })
}

/// `owner/name` parsed from the origin remote
pub fn origin_slug(repo: &Repository) -> Result<String> {
    let remote = repo.find_remote("origin")?;
    let remote_url = remote
        .url()
        .ok_or_else(|| git_err::operation_failed("remote.origin.url is not valid UTF-8"))?;

    url::github_slug(remote_url).ok_or_else(|| {
        git_err::operation_failed(format!(
            "could not parse a GitHub slug from remote.origin.url '{remote_url}'"
        ))
    })
}

/// Full SHA of the commit `HEAD` points at
pub fn head_sha(repo: &Repository) -> Result<String> {
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.id().to_string())
}

/// Committer time of `HEAD` as ISO 8601 with the committer's UTC offset
pub fn head_commit_time(repo: &Repository) -> Result<String> {
    let commit = repo.head()?.peel_to_commit()?;
    let time = commit.time();

    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .ok_or_else(|| git_err::operation_failed("HEAD commit has an invalid UTC offset"))?;
    let utc = DateTime::from_timestamp(time.seconds(), 0)
        .ok_or_else(|| git_err::operation_failed("HEAD commit time is out of range"))?;

    Ok(utc
        .with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::Secs, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Signature, Time};
    use tempfile::TempDir;

    fn repo_with_commit(temp: &TempDir) -> Repository {
        let repo = Repository::init(temp.path()).unwrap();
        std::fs::write(temp.path().join("README.md"), "armory\n").unwrap();
        {
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("README.md")).unwrap();
            index.write().unwrap();
            let tree_id = index.write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            let sig = Signature::new("Quartermaster", "qm@example.com", &Time::new(1_767_225_600, 120))
                .unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
        }
        repo
    }

    #[test]
    fn test_head_metadata() {
        let temp = TempDir::new().unwrap();
        let repo = repo_with_commit(&temp);

        let sha = head_sha(&repo).unwrap();
        assert_eq!(sha.len(), 40);
        assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(head_commit_time(&repo).unwrap(), "2026-01-01T02:00:00+02:00");
    }

    #[test]
    fn test_origin_slug() {
        let temp = TempDir::new().unwrap();
        let repo = repo_with_commit(&temp);
        repo.remote("origin", "git@github.com:sovereign/armory.git")
            .unwrap();

        assert_eq!(origin_slug(&repo).unwrap(), "sovereign/armory");
    }

    #[test]
    fn test_missing_origin_fails() {
        let temp = TempDir::new().unwrap();
        let repo = repo_with_commit(&temp);
        assert!(origin_slug(&repo).is_err());
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let temp = TempDir::new().unwrap();
        let Err(err) = open(temp.path()) else {
            panic!("expected failure outside a repository");
        };
        assert!(err.to_string().contains("no git repository"));
    }
}
