/// A company as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// Validated data for creating a company. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// A recurring filing obligation owned by exactly one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obligation {
    pub id: i32,
    pub name: String,
    pub periodicity: String,
    pub company_id: i32,
}

/// Validated data for creating an obligation.
///
/// `company_id` is not checked here; the foreign key rejects it at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObligation {
    pub name: String,
    pub periodicity: String,
    pub company_id: i32,
}
