//! Backend commands queued from UI to backend worker.

use shared::domain::NewCustomer;

pub enum BackendCommand {
    /// Fetch or revalidate the customer list.
    FetchCustomers,
    /// POST a new customer record.
    CreateCustomer { payload: NewCustomer },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchCustomers => "fetch_customers",
            BackendCommand::CreateCustomer { .. } => "create_customer",
        }
    }
}
