//! Domain resources behind the console views.
//!
//! Each list-backed resource pairs a wire model with a
//! [`ResourceAdapter`](crate::sync::ResourceAdapter) the sync engine
//! drives. Reports and the dashboard are not list resources: one is a
//! download service, the other a pure fold over already-loaded state.

pub mod client;
pub mod dashboard;
pub mod employee;
pub mod environment;
pub mod order;
pub mod product;
pub mod report;

pub use client::{Client, ClientAdapter, ClientDraft, ClientSynchronizer, MembershipType};
pub use dashboard::{compose, AlertSeverity, DashboardAlert, DashboardSummary};
pub use employee::{Employee, EmployeeAdapter, EmployeeSynchronizer};
pub use environment::{
    EnvironmentAdapter, EnvironmentOverview, EnvironmentSynchronizer, Occupancy, ZoneClimate,
    ZoneCondition,
};
pub use order::{
    NewOrder, Order, OrderAdapter, OrderBoard, OrderDraft, OrderStatus, OrderSynchronizer,
};
pub use product::{Product, ProductAdapter, ProductDraft, ProductSynchronizer, StockStatus};
pub use report::{ReportKind, ReportRange, ReportService};
