//! Translation of listing request parameters into a store query.
//!
//! Parameters arrive as raw strings so malformed numbers surface as
//! [`QueryError`]s with the offending value rather than as extractor rejections.

use serde::Deserialize;

use super::domain::Job;

/// Raw query string for the paginated listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
}

/// Raw query string for the listing count. Pagination and sort do not apply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountParams {
    pub search: Option<String>,
    pub filter: Option<String>,
}

/// Ordering on `application_deadline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineOrder {
    Ascending,
    Descending,
}

impl DeadlineOrder {
    fn parse(raw: Option<&str>) -> Result<Option<Self>, QueryError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) if value.eq_ignore_ascii_case("asc") => Ok(Some(Self::Ascending)),
            Some(value) if value.eq_ignore_ascii_case("desc") => Ok(Some(Self::Descending)),
            Some(other) => Err(QueryError::InvalidSort(other.to_string())),
        }
    }
}

/// Match predicate shared by the listing and its count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    title_prefix: String,
    category: Option<String>,
}

impl JobFilter {
    /// `search` is a literal, case-insensitive title prefix; an empty `category` is ignored.
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Self {
            title_prefix: search.unwrap_or_default().to_lowercase(),
            category,
        }
    }

    /// Lowercased title prefix.
    pub fn title_prefix(&self) -> &str {
        &self.title_prefix
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(category) = &self.category {
            if &job.category != category {
                return false;
            }
        }
        job.title.to_lowercase().starts_with(&self.title_prefix)
    }
}

/// Filter, optional ordering, and page window for a listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub filter: JobFilter,
    pub order: Option<DeadlineOrder>,
    pub skip: u64,
    pub limit: u64,
}

impl JobQuery {
    /// Evaluate the query over an in-order collection. Sorting is stable, so ties
    /// keep collection order.
    pub fn apply<'a, I>(&self, jobs: I) -> Vec<Job>
    where
        I: IntoIterator<Item = &'a Job>,
    {
        let mut matched: Vec<&Job> = jobs
            .into_iter()
            .filter(|job| self.filter.matches(job))
            .collect();

        match self.order {
            Some(DeadlineOrder::Ascending) => {
                matched.sort_by(|a, b| a.application_deadline.cmp(&b.application_deadline))
            }
            Some(DeadlineOrder::Descending) => {
                matched.sort_by(|a, b| b.application_deadline.cmp(&a.application_deadline))
            }
            None => {}
        }

        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        matched.into_iter().skip(skip).take(limit).cloned().collect()
    }
}

/// Client-input errors raised while building a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("page is required")]
    MissingPage,
    #[error("page must be a positive integer, got '{0}'")]
    InvalidPage(String),
    #[error("size is required")]
    MissingSize,
    #[error("size must be a positive integer, got '{0}'")]
    InvalidSize(String),
    #[error("sort must be 'asc' or 'desc', got '{0}'")]
    InvalidSort(String),
}

fn positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|value| *value >= 1)
}

impl ListingParams {
    pub fn build(&self) -> Result<JobQuery, QueryError> {
        let page = match self.page.as_deref() {
            None => return Err(QueryError::MissingPage),
            Some(raw) => positive(raw).ok_or_else(|| QueryError::InvalidPage(raw.to_string()))?,
        };
        let size = match self.size.as_deref() {
            None => return Err(QueryError::MissingSize),
            Some(raw) => positive(raw).ok_or_else(|| QueryError::InvalidSize(raw.to_string()))?,
        };
        let order = DeadlineOrder::parse(self.sort.as_deref())?;

        Ok(JobQuery {
            filter: JobFilter::new(self.search.as_deref(), self.filter.as_deref()),
            order,
            skip: (page - 1).saturating_mul(size),
            limit: size,
        })
    }
}

impl CountParams {
    pub fn filter(&self) -> JobFilter {
        JobFilter::new(self.search.as_deref(), self.filter.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::domain::{JobId, Poster};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::Map;

    fn job(index: usize, title: &str, category: &str, deadline_offset_days: i64) -> Job {
        let base = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        Job {
            id: JobId(format!("job-{index}")),
            title: title.to_string(),
            category: category.to_string(),
            application_deadline: base + Duration::days(deadline_offset_days),
            applicant_count: 0,
            poster: Poster {
                email: "poster@example.com".to_string(),
                details: Map::new(),
            },
            details: Map::new(),
        }
    }

    fn params(page: &str, size: &str) -> ListingParams {
        ListingParams {
            page: Some(page.to_string()),
            size: Some(size.to_string()),
            ..ListingParams::default()
        }
    }

    #[test]
    fn build_computes_skip_from_one_based_page() {
        let query = params("3", "10").build().expect("valid params");
        assert_eq!(query.skip, 20);
        assert_eq!(query.limit, 10);
        assert_eq!(query.order, None);
        assert_eq!(query.filter, JobFilter::default());
    }

    #[test]
    fn build_rejects_invalid_pagination() {
        assert_eq!(
            params("0", "10").build(),
            Err(QueryError::InvalidPage("0".to_string()))
        );
        assert_eq!(
            params("-1", "10").build(),
            Err(QueryError::InvalidPage("-1".to_string()))
        );
        assert_eq!(
            params("1", "0").build(),
            Err(QueryError::InvalidSize("0".to_string()))
        );
        assert_eq!(
            params("one", "10").build(),
            Err(QueryError::InvalidPage("one".to_string()))
        );
        assert_eq!(
            ListingParams::default().build(),
            Err(QueryError::MissingPage)
        );
        assert_eq!(
            ListingParams {
                page: Some("1".to_string()),
                ..ListingParams::default()
            }
            .build(),
            Err(QueryError::MissingSize)
        );
    }

    #[test]
    fn build_parses_sort_direction() {
        let mut listing = params("1", "5");
        listing.sort = Some("asc".to_string());
        assert_eq!(
            listing.build().expect("asc").order,
            Some(DeadlineOrder::Ascending)
        );

        listing.sort = Some("desc".to_string());
        assert_eq!(
            listing.build().expect("desc").order,
            Some(DeadlineOrder::Descending)
        );

        listing.sort = Some(String::new());
        assert_eq!(listing.build().expect("empty sort").order, None);

        listing.sort = Some("newest".to_string());
        assert_eq!(
            listing.build(),
            Err(QueryError::InvalidSort("newest".to_string()))
        );
    }

    #[test]
    fn empty_filter_is_ignored() {
        let filter = JobFilter::new(Some(""), Some(" "));
        assert_eq!(filter.category(), None);
        assert!(filter.matches(&job(1, "Anything", "Design", 0)));
    }

    #[test]
    fn title_prefix_is_case_insensitive_and_literal() {
        let filter = JobFilter::new(Some("ENG"), None);
        assert_eq!(filter.title_prefix(), "eng");
        assert!(filter.matches(&job(1, "engineering lead", "Engineering", 0)));
        assert!(filter.matches(&job(2, "Engineer", "Engineering", 0)));
        assert!(!filter.matches(&job(3, "Senior Engineer", "Engineering", 0)));

        let pattern = JobFilter::new(Some(".*"), None);
        assert!(!pattern.matches(&job(4, "Engineer", "Engineering", 0)));
        assert!(pattern.matches(&job(5, ".* literal", "Engineering", 0)));
    }

    #[test]
    fn category_match_is_exact() {
        let filter = JobFilter::new(None, Some("Engineering"));
        assert!(filter.matches(&job(1, "Lead", "Engineering", 0)));
        assert!(!filter.matches(&job(2, "Lead", "engineering", 0)));
        assert!(!filter.matches(&job(3, "Lead", "Engineering Ops", 0)));
    }

    #[test]
    fn apply_pages_through_sorted_matches() {
        let jobs: Vec<Job> = (0..25)
            .map(|index| job(index, &format!("Eng {index}"), "Engineering", 25 - index as i64))
            .chain((0..5).map(|index| job(100 + index, "Designer", "Design", 0)))
            .collect();

        let query = ListingParams {
            page: Some("2".to_string()),
            size: Some("10".to_string()),
            search: Some("eng".to_string()),
            filter: Some("Engineering".to_string()),
            sort: Some("asc".to_string()),
        }
        .build()
        .expect("valid params");

        let page = query.apply(jobs.iter());
        assert_eq!(page.len(), 10);
        assert!(page
            .windows(2)
            .all(|pair| pair[0].application_deadline <= pair[1].application_deadline));
        // Ascending deadlines reverse the insertion order, so records 11-20 are indices 14..=5.
        assert_eq!(page[0].id, JobId("job-14".to_string()));
        assert_eq!(page[9].id, JobId("job-5".to_string()));
    }

    #[test]
    fn apply_returns_partial_last_page_and_empty_beyond() {
        let jobs: Vec<Job> = (0..7).map(|index| job(index, "Eng", "Engineering", 0)).collect();

        let last = params("2", "5").build().expect("valid").apply(jobs.iter());
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].id, JobId("job-5".to_string()));

        let beyond = params("9", "5").build().expect("valid").apply(jobs.iter());
        assert!(beyond.is_empty());
    }

    #[test]
    fn descending_order_puts_latest_deadline_first() {
        let jobs = vec![
            job(1, "Eng", "Engineering", 3),
            job(2, "Eng", "Engineering", 9),
            job(3, "Eng", "Engineering", 1),
        ];
        let mut listing = params("1", "10");
        listing.sort = Some("desc".to_string());

        let ordered = listing.build().expect("valid").apply(jobs.iter());
        let ids: Vec<&str> = ordered.iter().map(|job| job.id.0.as_str()).collect();
        assert_eq!(ids, vec!["job-2", "job-1", "job-3"]);
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let query = params(&u64::MAX.to_string(), "10").build().expect("valid");
        assert_eq!(query.skip, u64::MAX);
    }
}
