// ============================================================================
// CONSTANTES - Claves de storage, mensajes y valores fijos
// ============================================================================

/// URL remota por defecto
/// Configurada en tiempo de compilación via QUOTES_REMOTE_URL
pub const DEFAULT_REMOTE_URL: &str = match option_env!("QUOTES_REMOTE_URL") {
    Some(url) => url,
    None => "https://jsonplaceholder.typicode.com/posts",
};

// Claves de localStorage
pub const QUOTES_STORAGE_KEY: &str = "quotes";
pub const LAST_CATEGORY_STORAGE_KEY: &str = "lastSelectedCategory";

// Claves de sessionStorage
pub const LAST_QUOTE_SESSION_KEY: &str = "lastQuote";

/// Categoría asignada a todo lo que llega del servidor
pub const SERVER_CATEGORY: &str = "Server";

/// Valor serializado del filtro "todas las categorías"
pub const ALL_CATEGORIES: &str = "all";
/// Prefijo del valor de una categoría real (en <option> y en lastSelectedCategory)
pub const CATEGORY_VALUE_PREFIX: &str = "category:";

pub const EXPORT_FILE_NAME: &str = "quotes.json";

// Mensajes visibles
pub const MSG_NO_QUOTES: &str = "No quotes available for this category.";
pub const MSG_EMPTY_FIELDS: &str = "Please fill in both fields.";
pub const MSG_INVALID_IMPORT: &str = "Invalid file format: expected a JSON array of quotes.";
pub const MSG_QUOTE_ADDED: &str = "Quote added successfully!";
pub const MSG_SYNC_UNDONE: &str = "Sync undone.";

/// Lista inicial cuando localStorage está vacío: (id, texto, categoría)
pub const SEED_QUOTES: [(i64, &str, &str); 3] = [
    (1, "The only limit to our realization of tomorrow is our doubts of today.", "Motivation"),
    (2, "Life is really simple, but we insist on making it complicated.", "Philosophy"),
    (3, "In the middle of difficulty lies opportunity.", "Inspiration"),
];
