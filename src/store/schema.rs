//! Relational shape of the match records and the tables they reference.
//!
//! Everything is `IF NOT EXISTS`: existing tables are left as they are.
//! Reference tables (`temporada`, `estadio`, `equipo`, `jugador`) are owned
//! by other services; they are declared here only so the foreign keys below
//! have something to point at on a fresh database.

pub const REFERENCE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS estadio (
        estadio_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        nombre VARCHAR(100) NOT NULL UNIQUE,
        capacidad INTEGER NOT NULL,
        ciudad VARCHAR(100) NOT NULL,
        pais VARCHAR(100) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipo (
        equipo_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        nombre VARCHAR(100) NOT NULL UNIQUE,
        estadio_id BIGINT NOT NULL REFERENCES estadio (estadio_id) ON DELETE RESTRICT,
        fecha_fundacion DATE NOT NULL,
        presupuesto NUMERIC(15, 2) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS temporada (
        temporada_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        anio_inicio INTEGER NOT NULL,
        anio_fin INTEGER NOT NULL,
        nombre_temporada VARCHAR(100) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS jugador (
        jugador_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        nombre VARCHAR(100) NOT NULL
    )
    "#,
];

pub const MATCH_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS partido (
        partido_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        temporada_id BIGINT NOT NULL REFERENCES temporada (temporada_id) ON DELETE RESTRICT,
        fecha DATE NOT NULL,
        hora TIME NOT NULL,
        estadio_id BIGINT NOT NULL REFERENCES estadio (estadio_id) ON DELETE RESTRICT,
        equipo_local BIGINT NOT NULL REFERENCES equipo (equipo_id) ON DELETE RESTRICT,
        equipo_visitante BIGINT NOT NULL REFERENCES equipo (equipo_id) ON DELETE RESTRICT,
        goles_local INTEGER NOT NULL DEFAULT 0 CHECK (goles_local >= 0),
        goles_visitante INTEGER NOT NULL DEFAULT 0 CHECK (goles_visitante >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS participa (
        partido_id BIGINT NOT NULL REFERENCES partido (partido_id) ON DELETE CASCADE,
        jugador_id BIGINT NOT NULL REFERENCES jugador (jugador_id) ON DELETE CASCADE,
        PRIMARY KEY (partido_id, jugador_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS gol (
        gol_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        partido_id BIGINT NOT NULL REFERENCES partido (partido_id) ON DELETE CASCADE,
        jugador_id BIGINT NOT NULL REFERENCES jugador (jugador_id) ON DELETE CASCADE,
        minuto INTEGER NOT NULL CHECK (minuto >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS amonestacion (
        amonest_id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        partido_id BIGINT NOT NULL REFERENCES partido (partido_id) ON DELETE CASCADE,
        jugador_id BIGINT NOT NULL REFERENCES jugador (jugador_id) ON DELETE CASCADE,
        minuto INTEGER NOT NULL CHECK (minuto >= 0),
        tipo TEXT NOT NULL CHECK (length(btrim(tipo)) > 0)
    )
    "#,
];

/// Statements in dependency order.
pub fn bootstrap_statements() -> impl Iterator<Item = &'static str> {
    REFERENCE_TABLES.iter().chain(MATCH_TABLES.iter()).copied()
}
