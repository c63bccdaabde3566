use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r"
CREATE TABLE IF NOT EXISTS empresas (
    id SERIAL PRIMARY KEY,
    nome VARCHAR NOT NULL,
    cnpj VARCHAR NOT NULL UNIQUE,
    endereco VARCHAR NOT NULL,
    email VARCHAR NOT NULL,
    telefone VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS obrigacoes (
    id SERIAL PRIMARY KEY,
    nome VARCHAR NOT NULL,
    periodicidade VARCHAR NOT NULL,
    empresa_id INTEGER NOT NULL REFERENCES empresas(id)
);

CREATE INDEX IF NOT EXISTS idx_obrigacoes_empresa_id ON obrigacoes(empresa_id);
                "
            }
            sea_orm::DatabaseBackend::MySql => {
                r"
CREATE TABLE IF NOT EXISTS empresas (
    id INT AUTO_INCREMENT PRIMARY KEY,
    nome VARCHAR(255) NOT NULL,
    cnpj VARCHAR(255) NOT NULL,
    endereco VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    telefone VARCHAR(255) NOT NULL,
    UNIQUE KEY idx_empresas_cnpj (cnpj)
);

CREATE TABLE IF NOT EXISTS obrigacoes (
    id INT AUTO_INCREMENT PRIMARY KEY,
    nome VARCHAR(255) NOT NULL,
    periodicidade VARCHAR(255) NOT NULL,
    empresa_id INT NOT NULL,
    KEY idx_obrigacoes_empresa_id (empresa_id),
    CONSTRAINT fk_obrigacoes_empresa FOREIGN KEY (empresa_id) REFERENCES empresas(id)
);
                "
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // AUTOINCREMENT keeps ids from being reused after external deletes.
                r"
CREATE TABLE IF NOT EXISTS empresas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    cnpj TEXT NOT NULL UNIQUE,
    endereco TEXT NOT NULL,
    email TEXT NOT NULL,
    telefone TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS obrigacoes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    periodicidade TEXT NOT NULL,
    empresa_id INTEGER NOT NULL REFERENCES empresas(id)
);

CREATE INDEX IF NOT EXISTS idx_obrigacoes_empresa_id ON obrigacoes(empresa_id);
                "
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP TABLE IF EXISTS obrigacoes;").await?;
        conn.execute_unprepared("DROP TABLE IF EXISTS empresas;").await?;
        Ok(())
    }
}
