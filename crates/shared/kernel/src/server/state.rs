use crate::fields::FieldRegistry;
use crate::shortcode::ShortcodeRegistry;
use crate::types::ContentTypeRegistry;
use axum::extract::FromRef;
use folio_domain::config::FolioConfig;
use folio_domain::registry::{FeatureSlice, InitializedSlice};
use folio_store::SharedStore;
use fxhash::FxHashMap;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[folio_derive::folio_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: FolioConfig,
    pub store: SharedStore,
    pub types: Arc<ContentTypeRegistry>,
    /// `None` when the field-management capability is absent.
    pub fields: Option<Arc<FieldRegistry>>,
    pub shortcodes: Arc<ShortcodeRegistry>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner.slices.get(&TypeId::of::<T>()).and_then(InitializedSlice::downcast::<T>)
    }

    /// Returns a reference to the slice if it is registered.
    ///
    /// # Errors
    /// Returns an error if the slice is not registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for FolioConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<FolioConfig>,
    store: Option<SharedStore>,
    types: Option<Arc<ContentTypeRegistry>>,
    fields: Option<Arc<FieldRegistry>>,
    shortcodes: Option<Arc<ShortcodeRegistry>>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn types(mut self, types: Arc<ContentTypeRegistry>) -> Self {
        self.types = Some(types);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: Option<Arc<FieldRegistry>>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn shortcodes(mut self, shortcodes: Arc<ShortcodeRegistry>) -> Self {
        self.shortcodes = Some(shortcodes);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// Registers multiple slices at once.
    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        self.slices.extend(slices.into_iter().map(|slice| (slice.id, slice)));
        self
    }

    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let store = self.store.ok_or_else(|| ApiStateError::Validation {
            message: "Entity store not provided".into(),
            context: None,
        })?;

        Ok(ApiState {
            inner: Arc::new(ApiStateInner {
                config: self.config.unwrap_or_default(),
                store,
                types: self.types.unwrap_or_default(),
                fields: self.fields,
                shortcodes: self.shortcodes.unwrap_or_default(),
                slices: self.slices,
            }),
        })
    }
}
