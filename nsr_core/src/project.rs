//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of column designs.
//! Projects serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (code edition, material and sweep defaults)
//! └── items: HashMap<Uuid, CalculationItem> (all columns)
//! ```
//!
//! Generated surfaces are not stored in the project. A caller that wants to
//! reuse them across edits keeps a [`SurfaceCache`] next to it.
//!
//! ## Example
//!
//! ```rust
//! use nsr_core::project::Project;
//!
//! let project = Project::new("Ing. Ana Gómez", "25-017", "Constructora Andina");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Nsr10"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::calculations::column::{generate_interaction_surface, ColumnInput, InteractionSurface};
use crate::calculations::interaction::{SteelRatioLimits, SweepOptions};
use crate::calculations::CalculationItem;
use crate::errors::CalcResult;
use crate::materials::{RebarSize, DEFAULT_FY_MPA};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings (code edition, defaults)
    pub settings: GlobalSettings,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nsr_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nsr_core::project::Project;
    /// use nsr_core::calculations::CalculationItem;
    ///
    /// let mut project = Project::new("Engineer", "25-001", "Client");
    /// let column = project.settings.new_column("C-1", 40.0, 50.0, 3, 1);
    ///
    /// let id = project.add_item(CalculationItem::Column(column));
    /// assert!(project.items.contains_key(&id));
    /// ```
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Mutable access marks the project as modified.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Columns in the project, sorted by label.
    pub fn columns(&self) -> Vec<(&Uuid, &ColumnInput)> {
        let mut columns: Vec<_> = self
            .items
            .iter()
            .map(|(id, item)| match item {
                CalculationItem::Column(c) => (id, c),
            })
            .collect();
        columns.sort_by(|a, b| a.1.label.cmp(&b.1.label));
        columns
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Design code edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesignCode {
    /// Reglamento Colombiano de Construcción Sismo Resistente NSR-10
    #[default]
    Nsr10,
}

impl DesignCode {
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignCode::Nsr10 => "NSR-10",
        }
    }
}

/// Global project settings.
///
/// Every field has a serde default so partial settings files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub code: DesignCode,

    /// Default concrete strength for new columns (MPa)
    pub concrete_fc_mpa: f64,

    /// Default steel yield strength (MPa)
    pub steel_fy_mpa: f64,

    /// Default clear cover to the stirrup (cm)
    pub clear_cover_cm: f64,

    /// Default stirrup size
    pub stirrup_size: RebarSize,

    /// Default longitudinal bar size
    pub bar_size: RebarSize,

    /// Default neutral-axis depth samples
    pub num_c_steps: usize,

    /// Default neutral-axis orientation samples
    pub num_theta_steps: usize,

    /// Permitted gross steel ratio band
    pub ratio_limits: SteelRatioLimits,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            code: DesignCode::Nsr10,
            concrete_fc_mpa: 28.0,
            steel_fy_mpa: DEFAULT_FY_MPA,
            clear_cover_cm: 4.0,
            stirrup_size: RebarSize::No3,
            bar_size: RebarSize::No6,
            num_c_steps: 30,
            num_theta_steps: 36,
            ratio_limits: SteelRatioLimits::default(),
        }
    }
}

impl GlobalSettings {
    /// Column input pre-filled with the project defaults.
    pub fn new_column(
        &self,
        label: impl Into<String>,
        width_cm: f64,
        depth_cm: f64,
        bars_per_face_x: u32,
        bars_per_face_y_interior: u32,
    ) -> ColumnInput {
        ColumnInput {
            label: label.into(),
            width_cm,
            depth_cm,
            clear_cover_cm: self.clear_cover_cm,
            stirrup_diameter_mm: self.stirrup_size.diameter_mm(),
            bar_diameter_mm: self.bar_size.diameter_mm(),
            bars_per_face_x,
            bars_per_face_y_interior,
            fc_mpa: self.concrete_fc_mpa,
            fy_mpa: self.steel_fy_mpa,
            num_c_steps: self.num_c_steps,
            num_theta_steps: self.num_theta_steps,
        }
    }

    /// Sweep options carrying the project's steel ratio band.
    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            ratio_limits: self.ratio_limits,
            ..SweepOptions::default()
        }
    }
}

/// Stable fingerprint of one generator call.
///
/// SHA-256 over the JSON encoding of the input and options, hex encoded.
pub fn surface_fingerprint(input: &ColumnInput, options: &SweepOptions) -> CalcResult<String> {
    #[derive(Serialize)]
    struct FingerprintData<'a> {
        input: &'a ColumnInput,
        options: &'a SweepOptions,
    }

    let encoded = serde_json::to_vec(&FingerprintData { input, options })?;
    let hash = Sha256::digest(encoded);
    Ok(format!("{hash:x}"))
}

/// Caller-owned memo of generated surfaces.
///
/// The generator stays pure; this map only avoids recomputing a surface for
/// an input that has not changed. Failed generations are not stored.
#[derive(Debug, Clone, Default)]
pub struct SurfaceCache {
    entries: HashMap<String, InteractionSurface>,
    hits: u64,
    misses: u64,
}

impl SurfaceCache {
    pub fn new() -> Self {
        SurfaceCache::default()
    }

    /// Return the cached surface for this input, generating it on a miss.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nsr_core::project::{GlobalSettings, SurfaceCache};
    /// use nsr_core::calculations::SweepOptions;
    ///
    /// let settings = GlobalSettings::default();
    /// let column = settings.new_column("C-1", 40.0, 50.0, 3, 1);
    /// let mut cache = SurfaceCache::new();
    ///
    /// let first = cache.get_or_generate(&column, &SweepOptions::default()).unwrap().len();
    /// let again = cache.get_or_generate(&column, &SweepOptions::default()).unwrap().len();
    /// assert_eq!(first, again);
    /// assert_eq!(cache.hits(), 1);
    /// ```
    pub fn get_or_generate(&mut self, input: &ColumnInput, options: &SweepOptions) -> CalcResult<&InteractionSurface> {
        let key = surface_fingerprint(input, options)?;
        if self.entries.contains_key(&key) {
            self.hits += 1;
            tracing::trace!(key = %key, "surface cache hit");
        } else {
            self.misses += 1;
            let surface = generate_interaction_surface(input, options)?;
            tracing::debug!(key = %key, label = %input.label, points = surface.len(), "surface cached");
            self.entries.insert(key.clone(), surface);
        }
        self.entries
            .get(&key)
            .ok_or_else(|| crate::errors::CalcError::Internal {
                message: "surface cache entry vanished".to_string(),
            })
    }

    pub fn get(&self, input: &ColumnInput, options: &SweepOptions) -> Option<&InteractionSurface> {
        surface_fingerprint(input, options)
            .ok()
            .and_then(|key| self.entries.get(&key))
    }

    /// Drop the entry for this input, if any.
    pub fn invalidate(&mut self, input: &ColumnInput, options: &SweepOptions) -> bool {
        match surface_fingerprint(input, options) {
            Ok(key) => self.entries.remove(&key).is_some(),
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
