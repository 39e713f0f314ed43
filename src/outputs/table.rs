//! CSV output of the article table.

use crate::models::ResolvedArticle;
use crate::utils::truncate_for_log;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Column headers, in output order.
pub const COLUMNS: [&str; 5] = ["Id", "Url", "Date", "Headline", "Body"];

/// Write `articles` to `path`, replacing any previous file.
///
/// The header row is written even when there are no articles.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = articles.len()))]
pub fn write_articles(articles: &[ResolvedArticle], path: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(COLUMNS)?;

    for article in articles {
        debug!(
            id = %article.id,
            url = %article.url,
            headline = %article.headline,
            body = %truncate_for_log(&article.body, 80),
            "Writing row"
        );
        writer.serialize(article)?;
    }
    writer.flush()?;

    info!("Wrote article table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, url: &str, body: &str) -> ResolvedArticle {
        ResolvedArticle {
            id: id.to_string(),
            url: url.to_string(),
            published_at: "06/05/2025 14:30 GMT+1".to_string(),
            headline: "Quoted, \"headline\"".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_header_written_for_empty_table() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        write_articles(&[], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Id,Url,Date,Headline,Body\n");
    }

    #[test]
    fn test_rows_round_trip_through_csv_reader() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        let articles = vec![
            article("1", "https://a", "Line one, with comma."),
            article("2", "https://b", "Second body"),
        ];
        write_articles(&articles, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, COLUMNS);
        let rows: Vec<ResolvedArticle> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, articles);
    }

    #[test]
    fn test_previous_file_is_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        write_articles(&[article("1", "https://a", "a"), article("2", "https://b", "b")], &path)
            .unwrap();
        write_articles(&[article("3", "https://c", "c")], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("https://c"));
        assert!(!contents.contains("https://a"));
    }
}
