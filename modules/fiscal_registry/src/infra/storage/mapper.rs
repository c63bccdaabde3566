use crate::domain::models::{Company, Obligation};
use crate::infra::storage::entity::{company, obligation};

/// Rows convert into domain models by value.
impl From<company::Model> for Company {
    fn from(e: company::Model) -> Self {
        Self {
            id: e.id,
            name: e.nome,
            tax_id: e.cnpj,
            address: e.endereco,
            email: e.email,
            phone: e.telefone,
        }
    }
}

impl From<obligation::Model> for Obligation {
    fn from(e: obligation::Model) -> Self {
        Self {
            id: e.id,
            name: e.nome,
            periodicity: e.periodicidade,
            company_id: e.empresa_id,
        }
    }
}
