use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::artifact::{Artifact, ArtifactUpdate, NewArtifact};
use crate::domain::types::ArtifactId;
use crate::domain::version::{ArtifactVersion, NewArtifactVersion};
use crate::models::artifact::{
    Artifact as DbArtifact, ArtifactChangeset, NewArtifact as DbNewArtifact,
};
use crate::models::artifact_version::{
    ArtifactVersion as DbArtifactVersion, NewArtifactVersion as DbNewArtifactVersion,
};
use crate::repository::{
    ArtifactListQuery, ArtifactReader, ArtifactSortField, ArtifactWriter, DieselRepository,
    RepositoryError, RepositoryResult,
};

const LIKE_ESCAPE: char = '\\';

/// Escapes `%`, `_` and the escape character itself for a `LIKE` pattern.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Attaches versions to already loaded artifacts, oldest first.
fn with_versions(
    conn: &mut SqliteConnection,
    rows: Vec<DbArtifact>,
) -> RepositoryResult<Vec<Artifact>> {
    use crate::schema::artifact_versions;

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let mut versions: HashMap<i32, Vec<ArtifactVersion>> = HashMap::new();
    for row in artifact_versions::table
        .filter(artifact_versions::artifact_id.eq_any(&ids))
        .order(artifact_versions::id.asc())
        .load::<DbArtifactVersion>(conn)?
    {
        let artifact_id = row.artifact_id;
        versions
            .entry(artifact_id)
            .or_default()
            .push(row.try_into()?);
    }

    rows.into_iter()
        .map(|row| -> RepositoryResult<Artifact> {
            let id = row.id;
            let mut artifact: Artifact = row.try_into()?;
            artifact.versions = versions.remove(&id).unwrap_or_default();
            Ok(artifact)
        })
        .collect()
}

fn find_artifact(
    conn: &mut SqliteConnection,
    id: ArtifactId,
) -> RepositoryResult<Option<Artifact>> {
    use crate::schema::artifacts;

    let row = artifacts::table
        .find(id.get())
        .first::<DbArtifact>(conn)
        .optional()?;

    match row {
        Some(row) => Ok(with_versions(conn, vec![row])?.into_iter().next()),
        None => Ok(None),
    }
}

impl ArtifactReader for DieselRepository {
    fn list_artifacts(
        &self,
        query: ArtifactListQuery,
    ) -> RepositoryResult<(usize, Vec<Artifact>)> {
        use crate::schema::artifacts;

        let mut conn = self.conn()?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| format!("%{}%", escape_like(term)));
        let category_ids: Vec<i32> = query.category_ids.iter().map(|id| id.get()).collect();

        let query_builder = || {
            let mut items = artifacts::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(pattern) = &search {
                items = items.filter(
                    artifacts::title
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE)
                        .or(artifacts::description
                            .like(pattern.clone())
                            .escape(LIKE_ESCAPE)),
                );
            }

            if let Some(language) = &query.programming_language {
                items = items.filter(artifacts::programming_language.eq(language.as_str()));
            }

            if let Some(framework) = &query.framework {
                items = items.filter(artifacts::framework.eq(framework.as_str()));
            }

            if let Some(license_type) = &query.license_type {
                items = items.filter(artifacts::license_type.eq(license_type.as_str()));
            }

            if !category_ids.is_empty() {
                items = items.filter(artifacts::category_id.eq_any(category_ids.clone()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        items = match (query.sort_field, query.sort_descending) {
            (ArtifactSortField::Title, false) => {
                items.order((artifacts::title.asc(), artifacts::id.asc()))
            }
            (ArtifactSortField::Title, true) => {
                items.order((artifacts::title.desc(), artifacts::id.asc()))
            }
            (ArtifactSortField::Created, false) => {
                items.order((artifacts::created_at.asc(), artifacts::id.asc()))
            }
            (ArtifactSortField::Created, true) => {
                items.order((artifacts::created_at.desc(), artifacts::id.asc()))
            }
            (ArtifactSortField::Author, false) => {
                items.order((artifacts::author.asc(), artifacts::id.asc()))
            }
            (ArtifactSortField::Author, true) => {
                items.order((artifacts::author.desc(), artifacts::id.asc()))
            }
            (ArtifactSortField::Id, _) => items.order(artifacts::id.asc()),
        };

        let rows = items.load::<DbArtifact>(&mut conn)?;
        let items = with_versions(&mut conn, rows)?;

        Ok((total, items))
    }

    fn get_artifact_by_id(&self, id: ArtifactId) -> RepositoryResult<Option<Artifact>> {
        let mut conn = self.conn()?;
        find_artifact(&mut conn, id)
    }
}

impl ArtifactWriter for DieselRepository {
    fn create_artifact(&self, artifact: &NewArtifact) -> RepositoryResult<Artifact> {
        use crate::schema::{artifacts, categories};

        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let category = categories::table
                .find(artifact.category_id.get())
                .select(categories::id)
                .first::<i32>(conn)
                .optional()?;
            if category.is_none() {
                return Err(RepositoryError::NotFound);
            }

            let row = diesel::insert_into(artifacts::table)
                .values(DbNewArtifact::from(artifact))
                .get_result::<DbArtifact>(conn)?;

            Ok(row.try_into()?)
        })
    }

    fn update_artifact(
        &self,
        id: ArtifactId,
        update: &ArtifactUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::artifacts;

        let mut conn = self.conn()?;

        let affected = diesel::update(artifacts::table.find(id.get()))
            .set(ArtifactChangeset::from(update))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_artifact(&self, id: ArtifactId) -> RepositoryResult<usize> {
        use crate::schema::{artifact_versions, artifacts};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            diesel::delete(
                artifact_versions::table.filter(artifact_versions::artifact_id.eq(id.get())),
            )
            .execute(conn)?;

            diesel::delete(artifacts::table.find(id.get())).execute(conn)
        })?;

        Ok(affected)
    }

    fn add_artifact_version(
        &self,
        id: ArtifactId,
        version: &NewArtifactVersion,
    ) -> RepositoryResult<ArtifactVersion> {
        use crate::schema::{artifact_versions, artifacts};

        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let mut artifact = find_artifact(conn, id)?.ok_or(RepositoryError::NotFound)?;

            let row = diesel::insert_into(artifact_versions::table)
                .values(DbNewArtifactVersion::for_artifact(id.get(), version))
                .get_result::<DbArtifactVersion>(conn)?;
            let added = artifact.add_version(row.try_into()?)?.clone();

            diesel::update(artifacts::table.find(id.get()))
                .set(artifacts::current_version.eq(artifact.current_version.as_str()))
                .execute(conn)?;

            Ok(added)
        })
    }
}
