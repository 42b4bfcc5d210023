//! Nested-set bounds maintenance shared by the category and region trees.

use adboard_core::taxonomy::{NewNode, Tree};
use adboard_core::types::DbId;
use sqlx::PgConnection;

use crate::error::DbError;

/// Recompute lft/rgt/depth for a whole tree table from parent pointers
/// and write them back in one statement.
///
/// Runs inside the caller's transaction so structural mutations and their
/// bounds land atomically. The table name is a compile-time constant at
/// every call site, never user input.
pub(crate) async fn rebuild(conn: &mut PgConnection, table: &str) -> Result<(), DbError> {
    let rows: Vec<(DbId, Option<DbId>, String, String, i32)> =
        sqlx::query_as(&format!(
            "SELECT id, parent_id, name, slug, sort FROM {table}"
        ))
        .fetch_all(&mut *conn)
        .await?;

    let count = rows.len();
    let tree = Tree::build(rows.into_iter().map(|(id, parent_id, name, slug, sort)| NewNode {
        id,
        parent_id,
        name,
        slug,
        sort,
    }))?;

    let mut ids: Vec<i64> = Vec::with_capacity(count);
    let mut lfts: Vec<i64> = Vec::with_capacity(count);
    let mut rgts: Vec<i64> = Vec::with_capacity(count);
    let mut depths: Vec<i32> = Vec::with_capacity(count);
    for node in tree.nodes() {
        ids.push(node.id);
        lfts.push(node.lft());
        rgts.push(node.rgt());
        depths.push(node.depth());
    }

    sqlx::query(&format!(
        "UPDATE {table} AS t
         SET lft = u.lft, rgt = u.rgt, depth = u.depth
         FROM UNNEST($1::bigint[], $2::bigint[], $3::bigint[], $4::int[])
              AS u(id, lft, rgt, depth)
         WHERE t.id = u.id"
    ))
    .bind(&ids)
    .bind(&lfts)
    .bind(&rgts)
    .bind(&depths)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(table, nodes = count, "Rebuilt tree bounds");

    Ok(())
}
