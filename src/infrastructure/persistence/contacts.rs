use crate::domain::entities::{Contact, ContactSearchParams, BIRTHDAY_FORMAT};
use crate::domain::ports::contact_repository::ContactRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{any::AnyRow, Row};

const CONTACT_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone, birthday, \
     data_add, created_at, updated_at";

fn contact_from_row(row: &AnyRow) -> ApiResult<Contact> {
    let birthday: String = row.try_get("birthday")?;
    let birthday = NaiveDate::parse_from_str(&birthday, BIRTHDAY_FORMAT).map_err(|e| {
        ApiError::Internal(format!("Stored birthday '{}' is not a date: {}", birthday, e))
    })?;

    Ok(Contact {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        birthday,
        // Handle NULL for data_add
        data_add: row.try_get("data_add").ok(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn contacts_from_rows(rows: Vec<AnyRow>) -> ApiResult<Vec<Contact>> {
    rows.iter().map(contact_from_row).collect()
}

/// `%needle%` for LIKE, with the wildcard characters of the needle escaped.
/// SQLite's LOWER only folds ASCII, so the needle is folded the same way.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_ascii_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ContactRepository for Database {
    async fn create_contact(&self, contact: &Contact) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO contacts (id, user_id, first_name, last_name, email, phone, birthday,
                                   data_add, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&contact.id)
        .bind(&contact.user_id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.birthday.format(BIRTHDAY_FORMAT).to_string())
        .bind(contact.data_add.as_deref())
        .bind(&contact.created_at)
        .bind(&contact.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_contact(&self, user_id: &str, contact_id: &str) -> ApiResult<Option<Contact>> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE id = ? AND user_id = ?",
            CONTACT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(contact_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(contact_from_row).transpose()
    }

    async fn list_contacts(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<Contact>> {
        let sql = format!(
            "SELECT {} FROM contacts
             WHERE user_id = ?
             ORDER BY created_at DESC, id
             LIMIT ? OFFSET ?",
            CONTACT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        contacts_from_rows(rows)
    }

    async fn list_all_contacts(&self, user_id: &str) -> ApiResult<Vec<Contact>> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE user_id = ? ORDER BY created_at, id",
            CONTACT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        contacts_from_rows(rows)
    }

    async fn update_contact(&self, contact: &Contact) -> ApiResult<()> {
        sqlx::query(
            "UPDATE contacts
             SET first_name = ?, last_name = ?, email = ?, phone = ?, birthday = ?,
                 data_add = ?, updated_at = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.birthday.format(BIRTHDAY_FORMAT).to_string())
        .bind(contact.data_add.as_deref())
        .bind(&contact.updated_at)
        .bind(&contact.id)
        .bind(&contact.user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_contact(&self, user_id: &str, contact_id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ? AND user_id = ?")
            .bind(contact_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_contacts(
        &self,
        user_id: &str,
        params: &ContactSearchParams,
    ) -> ApiResult<Vec<Contact>> {
        let mut sql = format!("SELECT {} FROM contacts WHERE user_id = ?", CONTACT_COLUMNS);
        let mut patterns = Vec::new();

        for (column, filter) in [
            ("first_name", &params.first_name),
            ("last_name", &params.last_name),
            ("email", &params.email),
        ] {
            if let Some(value) = filter {
                sql.push_str(&format!(" AND LOWER({}) LIKE ? ESCAPE '\\'", column));
                patterns.push(like_pattern(value));
            }
        }
        sql.push_str(" ORDER BY last_name, first_name, id");

        let mut query = sqlx::query(&sql).bind(user_id);
        for pattern in patterns {
            query = query.bind(pattern);
        }

        let rows = query.fetch_all(&self.pool).await?;
        contacts_from_rows(rows)
    }
}
