//! Browse service
//!
//! Movie listing and detail pages. Sorting and the runtime window are
//! applied by TMDB; the search box filters the fetched rows through the
//! data table.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{CastMember, MovieDetails, MovieSummary, Paginated, TmdbPage};
use crate::domain::ports::{DiscoverParams, TmdbClient};
use crate::error::AppError;
use crate::ui::{BrowseQuery, CellValue, DataTable, SortDirection, TableRow, DEFAULT_PAGE_SIZE};

/// TMDB refuses pages past 500
pub const TMDB_MAX_PAGE: usize = 500;

/// Fixed size of a TMDB list page
pub const TMDB_PAGE_SIZE: usize = 20;

/// Results on the dashboard's trending strip
const TRENDING_LIMIT: usize = 8;

impl TableRow for MovieSummary {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "title" => CellValue::Text(self.title.clone()),
            "rating" => CellValue::Number(self.vote_average),
            "popularity" => CellValue::Number(self.popularity),
            "release_date" if !self.release_date.is_empty() => {
                CellValue::Text(self.release_date.clone())
            }
            _ => CellValue::Empty,
        }
    }

    fn searchable_text(&self) -> String {
        self.title.clone()
    }
}

impl TableRow for CastMember {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "order" => CellValue::Number(f64::from(self.order)),
            "name" => CellValue::Text(self.name.clone()),
            "character" if !self.character.is_empty() => CellValue::Text(self.character.clone()),
            _ => CellValue::Empty,
        }
    }

    fn searchable_text(&self) -> String {
        format!("{} {}", self.name, self.character)
    }
}

/// One TMDB discover page after the search filter
///
/// Paging counts are TMDB's, capped to the pages it will serve:
/// `total_results <= page_count * TMDB_PAGE_SIZE`. `results` is what survived
/// the search filter out of the `fetched` rows of this page only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePage {
    /// 1-based TMDB page
    pub page: usize,
    pub page_count: usize,
    pub total_results: usize,
    pub fetched: usize,
    pub results: Vec<MovieSummary>,
}

impl BrowsePage {
    fn from_tmdb(page: usize, tmdb: TmdbPage<MovieSummary>, search: &str) -> Self {
        let page_count = (tmdb.total_pages as usize).clamp(1, TMDB_MAX_PAGE);
        let total_results = (tmdb.total_results as usize).min(page_count * TMDB_PAGE_SIZE);
        let fetched = tmdb.results.len();
        let results = DataTable::new(tmdb.results).filter(search).into_rows();

        Self {
            page,
            page_count,
            total_results,
            fetched,
            results,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Movie detail page data
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub details: MovieDetails,
    pub cast: Paginated<CastMember>,
    pub crew_count: usize,
}

pub struct BrowseService {
    tmdb: Arc<dyn TmdbClient>,
}

impl BrowseService {
    pub fn new(tmdb: Arc<dyn TmdbClient>) -> Self {
        Self { tmdb }
    }

    /// Fetch the TMDB page for `query` and apply its search text
    pub async fn browse(&self, query: &BrowseQuery) -> Result<BrowsePage, AppError> {
        let page = query.page.min(TMDB_MAX_PAGE);
        let params = DiscoverParams {
            sort_by: query.sort_by.to_string(),
            min_runtime: query.min_runtime,
            max_runtime: query.max_runtime,
            page: page as u32,
        };

        let result = self.tmdb.discover_movies(&params).await?;
        Ok(BrowsePage::from_tmdb(page, result, &query.search))
    }

    /// Details and credits, fetched concurrently
    ///
    /// The cast is ordered by billing, filtered by `cast_filter` and paged.
    pub async fn movie_page(
        &self,
        id: i64,
        cast_filter: &str,
        cast_page: usize,
    ) -> Result<MoviePage, AppError> {
        let (details, credits) = tokio::try_join!(
            self.tmdb.movie_details(id),
            self.tmdb.movie_credits(id)
        )?;

        let crew_count = credits.crew.len();
        let cast = DataTable::new(credits.cast)
            .sort_by("order", SortDirection::Asc)
            .filter(cast_filter)
            .paginate(cast_page, DEFAULT_PAGE_SIZE);

        Ok(MoviePage {
            details,
            cast,
            crew_count,
        })
    }

    pub async fn trending(&self) -> Result<Vec<MovieSummary>, AppError> {
        let mut page = self.tmdb.trending_movies().await?;
        page.results.truncate(TRENDING_LIMIT);
        Ok(page.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_cast_member, test_movie, MockTmdbClient};
    use crate::ui::SortBy;

    fn service(tmdb: MockTmdbClient) -> (BrowseService, Arc<MockTmdbClient>) {
        let tmdb = Arc::new(tmdb);
        (BrowseService::new(tmdb.clone()), tmdb)
    }

    #[tokio::test]
    async fn browse_forwards_sort_and_runtime() {
        let (service, tmdb) = service(MockTmdbClient::new());
        let query = BrowseQuery::default()
            .with_sort(SortBy::RatingDesc)
            .with_runtime(80, 130);

        service.browse(&query).await.unwrap();

        let calls = tmdb.discover_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].sort_by, "vote_average.desc");
        assert_eq!((calls[0].min_runtime, calls[0].max_runtime), (80, 130));
        assert_eq!(calls[0].page, 1);
    }

    #[tokio::test]
    async fn browse_filters_rows_by_search() {
        let (service, _) = service(MockTmdbClient::new().with_movies(vec![
            test_movie(1, "Alien"),
            test_movie(2, "Heat"),
            test_movie(3, "Aliens"),
        ]));

        let page = service
            .browse(&BrowseQuery::default().with_search("alien"))
            .await
            .unwrap();

        assert_eq!(page.fetched, 3);
        let titles: Vec<_> = page.results.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Aliens"]);
    }

    #[tokio::test]
    async fn browse_caps_page_at_tmdb_limit() {
        let (service, tmdb) = service(MockTmdbClient::new());

        let page = service
            .browse(&BrowseQuery::default().with_page(9_999))
            .await
            .unwrap();

        assert_eq!(tmdb.discover_calls()[0].page, 500);
        assert_eq!(page.page, 500);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn browse_counts_stay_within_served_pages() {
        let (service, _) = service(
            MockTmdbClient::new()
                .with_movies(vec![test_movie(1, "Heat")])
                .with_total_pages(2_500)
                .with_total_results(50_000),
        );

        let page = service.browse(&BrowseQuery::default()).await.unwrap();

        assert_eq!(page.page_count, TMDB_MAX_PAGE);
        assert_eq!(page.total_results, TMDB_MAX_PAGE * TMDB_PAGE_SIZE);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[tokio::test]
    async fn search_narrows_rows_but_not_page_counts() {
        let (service, _) = service(
            MockTmdbClient::new()
                .with_movies(vec![
                    test_movie(1, "Heat"),
                    test_movie(2, "Alien"),
                    test_movie(3, "Arrival"),
                ])
                .with_total_pages(900),
        );

        let page = service
            .browse(&BrowseQuery::default().with_search("heat"))
            .await
            .unwrap();

        assert_eq!(page.page_count, TMDB_MAX_PAGE);
        assert_eq!(page.total_results, 3);
        assert_eq!(page.fetched, 3);
        assert_eq!(page.results.len(), 1);
        assert!(page.total_results <= page.page_count * TMDB_PAGE_SIZE);
    }

    #[tokio::test]
    async fn browse_propagates_upstream_failure() {
        let (service, _) = service(MockTmdbClient::failing());

        let result = service.browse(&BrowseQuery::default()).await;

        assert!(matches!(result, Err(AppError::Tmdb(_))));
    }

    #[tokio::test]
    async fn movie_page_orders_cast_by_billing() {
        let (service, _) = service(MockTmdbClient::new().with_movie(550, "Fight Club").with_cast(
            550,
            vec![
                test_cast_member(3, "Meat Loaf", 2),
                test_cast_member(1, "Edward Norton", 0),
                test_cast_member(2, "Brad Pitt", 1),
            ],
        ));

        let page = service.movie_page(550, "", 1).await.unwrap();

        assert_eq!(page.details.title, "Fight Club");
        let names: Vec<_> = page.cast.data.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Edward Norton", "Brad Pitt", "Meat Loaf"]);
    }

    #[tokio::test]
    async fn movie_page_filters_cast() {
        let (service, _) = service(MockTmdbClient::new().with_movie(550, "Fight Club").with_cast(
            550,
            vec![
                test_cast_member(1, "Edward Norton", 0),
                test_cast_member(2, "Brad Pitt", 1),
            ],
        ));

        let page = service.movie_page(550, "pitt", 1).await.unwrap();

        assert_eq!(page.cast.total, 1);
        assert_eq!(page.cast.data[0].name, "Brad Pitt");
    }

    #[tokio::test]
    async fn movie_page_for_unknown_movie_fails() {
        let (service, _) = service(MockTmdbClient::new());

        assert!(service.movie_page(1, "", 1).await.is_err());
    }

    #[tokio::test]
    async fn trending_is_truncated() {
        let movies = (1..=20).map(|i| test_movie(i, "Movie")).collect();
        let (service, _) = service(MockTmdbClient::new().with_movies(movies));

        assert_eq!(service.trending().await.unwrap().len(), TRENDING_LIMIT);
    }
}
