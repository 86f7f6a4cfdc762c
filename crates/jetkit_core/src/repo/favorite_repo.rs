//! Favorite city and unit setting repositories.
//!
//! # Invariants
//! - `favorites.city` is the identity; comparisons are case-sensitive.
//! - Inserts replace an existing row with the same identity.

use crate::model::favorite::{Favorite, UnitSetting};
use crate::repo::{ensure_changed, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for saved cities.
pub trait FavoriteRepository {
    fn list_favorites(&self) -> RepoResult<Vec<Favorite>>;
    fn get_favorite(&self, city: &str) -> RepoResult<Option<Favorite>>;
    fn insert_favorite(&self, favorite: &Favorite) -> RepoResult<String>;
    fn update_favorite(&self, favorite: &Favorite) -> RepoResult<()>;
    fn delete_favorite(&self, city: &str) -> RepoResult<()>;
    /// Returns the number of removed rows.
    fn delete_all_favorites(&self) -> RepoResult<usize>;
}

/// Repository interface for the unit setting table.
pub trait UnitRepository {
    fn list_units(&self) -> RepoResult<Vec<UnitSetting>>;
    fn insert_unit(&self, unit: &UnitSetting) -> RepoResult<String>;
    fn delete_unit(&self, unit: &str) -> RepoResult<()>;
    fn delete_all_units(&self) -> RepoResult<usize>;
}

/// SQLite-backed favorites repository.
pub struct SqliteFavoriteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFavoriteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FavoriteRepository for SqliteFavoriteRepository<'_> {
    fn list_favorites(&self) -> RepoResult<Vec<Favorite>> {
        let mut stmt = self.conn.prepare(
            "SELECT city, country
             FROM favorites
             ORDER BY created_at ASC, city ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut favorites = Vec::new();
        while let Some(row) = rows.next()? {
            favorites.push(parse_favorite_row(row)?);
        }
        Ok(favorites)
    }

    fn get_favorite(&self, city: &str) -> RepoResult<Option<Favorite>> {
        let mut stmt = self
            .conn
            .prepare("SELECT city, country FROM favorites WHERE city = ?1;")?;
        let mut rows = stmt.query([city])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_favorite_row(row)?));
        }
        Ok(None)
    }

    fn insert_favorite(&self, favorite: &Favorite) -> RepoResult<String> {
        favorite.validate()?;
        self.conn.execute(
            "INSERT INTO favorites (city, country) VALUES (?1, ?2)
             ON CONFLICT(city) DO UPDATE SET country = excluded.country;",
            params![favorite.city.as_str(), favorite.country.as_str()],
        )?;
        Ok(favorite.city.clone())
    }

    fn update_favorite(&self, favorite: &Favorite) -> RepoResult<()> {
        favorite.validate()?;
        let changed = self.conn.execute(
            "UPDATE favorites SET country = ?2 WHERE city = ?1;",
            params![favorite.city.as_str(), favorite.country.as_str()],
        )?;
        ensure_changed(changed, &favorite.city)
    }

    fn delete_favorite(&self, city: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM favorites WHERE city = ?1;", [city])?;
        ensure_changed(changed, city)
    }

    fn delete_all_favorites(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM favorites;", [])?)
    }
}

/// SQLite-backed unit setting repository.
pub struct SqliteUnitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUnitRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UnitRepository for SqliteUnitRepository<'_> {
    fn list_units(&self) -> RepoResult<Vec<UnitSetting>> {
        let mut stmt = self
            .conn
            .prepare("SELECT unit FROM units ORDER BY rowid ASC;")?;
        let mut rows = stmt.query([])?;
        let mut units = Vec::new();
        while let Some(row) = rows.next()? {
            units.push(UnitSetting {
                unit: row.get("unit")?,
            });
        }
        Ok(units)
    }

    fn insert_unit(&self, unit: &UnitSetting) -> RepoResult<String> {
        unit.validate()?;
        self.conn.execute(
            "INSERT OR REPLACE INTO units (unit) VALUES (?1);",
            [unit.unit.as_str()],
        )?;
        Ok(unit.unit.clone())
    }

    fn delete_unit(&self, unit: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM units WHERE unit = ?1;", [unit])?;
        ensure_changed(changed, unit)
    }

    fn delete_all_units(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM units;", [])?)
    }
}

fn parse_favorite_row(row: &Row<'_>) -> RepoResult<Favorite> {
    Ok(Favorite {
        city: row.get("city")?,
        country: row.get("country")?,
    })
}
