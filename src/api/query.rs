use crate::store::PetFilter;

use super::ApiError;

/// Query parameters of `GET /pets`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindPetsParams {
    pub tags: Option<Vec<String>>,
    pub limit: Option<u32>,
}

impl FindPetsParams {
    /// Decode from raw query pairs.
    ///
    /// `tags` may repeat and each value may hold a comma separated list;
    /// empty entries are dropped. The last `limit` wins. Other keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "tags" => {
                    let tags = params.tags.get_or_insert_with(Vec::new);
                    tags.extend(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|tag| !tag.is_empty())
                            .map(str::to_string),
                    );
                }
                "limit" => {
                    let limit = value.trim().parse::<u32>().map_err(|_| {
                        ApiError::bad_request(format!(
                            "Invalid format for parameter limit: {value}"
                        ))
                    })?;
                    params.limit = Some(limit);
                }
                _ => {}
            }
        }

        if params.tags.as_ref().is_some_and(Vec::is_empty) {
            params.tags = None;
        }
        Ok(params)
    }
}

impl From<FindPetsParams> for PetFilter {
    fn from(params: FindPetsParams) -> Self {
        PetFilter {
            tags: params.tags,
            limit: params.limit,
        }
    }
}
