use serde::Deserialize;

/// A single gallery photo. Never mutated after it leaves the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub image_url: String,
    pub description: Option<String>,
}

impl Photo {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Photos of one subcategory in display order.
pub type PhotoSet = Vec<Photo>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subcategory {
    pub id: Option<u64>,
    pub name: String,
    pub category: Option<String>,
}

/// Everything a successful fetch yields for one subcategory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedGallery {
    pub subcategory: Subcategory,
    pub photos: PhotoSet,
}

#[derive(Debug, Deserialize)]
pub struct SubcategoryPhotosResponse {
    pub success: bool,
    #[serde(default)]
    pub subcategoria: Option<SubcategoryDto>,
    #[serde(default)]
    pub fotos: Vec<PhotoDto>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubcategoryDto {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub categoria: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoDto {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub imagen_url: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub orden: Option<i64>,
}

impl PhotoDto {
    /// Returns `None` for entries without a usable image url.
    pub fn into_photo(self) -> Option<Photo> {
        let image_url = self.imagen_url?.trim().to_string();
        if image_url.is_empty() {
            return None;
        }
        let description = self
            .descripcion
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Some(Photo {
            image_url,
            description,
        })
    }
}

impl From<SubcategoryDto> for Subcategory {
    fn from(dto: SubcategoryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.nombre,
            category: dto.categoria,
        }
    }
}

impl SubcategoryPhotosResponse {
    /// Keeps backend order and drops malformed photo entries.
    pub fn into_gallery(self) -> FetchedGallery {
        let photos: PhotoSet = self
            .fotos
            .into_iter()
            .filter_map(PhotoDto::into_photo)
            .collect();
        FetchedGallery {
            subcategory: self.subcategoria.map(Subcategory::from).unwrap_or_default(),
            photos,
        }
    }
}
