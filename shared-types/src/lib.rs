use serde::{Deserialize, Serialize};

pub mod expense;
pub mod extraction;
pub mod file;
pub mod summary;
pub mod team;
pub mod user;

pub use expense::{
    CategorizeRequest, CategorizeResponse, CategorizedAmount, Category, CreateExpenseRequest,
    Expense, ExpenseStatus, ExpensesResponse, SpendEntry, SuggestTitleRequest,
    SuggestTitleResponse, UpdateExpenseRequest,
};
pub use extraction::{
    DocumentProcessingResult, ExtractTextRequest, ExtractTextResponse, ExtractedRecord,
    ExtractionError, ProcessFileResponse, ValidationReport,
};
pub use file::{FilesResponse, StoredFile};
pub use summary::{
    CategoryBreakdown, CategoryStat, ExpenseStats, ExpenseSummary, MonthlyTotal, SummaryResponse,
};
pub use team::{AddTeamMemberRequest, CreateTeamRequest, Team, TeamRole, TeamsResponse};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Session, User};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
