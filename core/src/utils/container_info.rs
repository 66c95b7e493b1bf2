/// Memory usage details of a single container
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerInfoEntry {
    pub name: String,
    pub count: usize,
    pub sizeof_element: usize,
}

/// Memory usage diagnostics of a component, one entry per container it owns
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerInfo {
    entries: Vec<ContainerInfoEntry>,
}

impl ContainerInfo {
    pub fn entries(&self) -> &[ContainerInfoEntry] {
        &self.entries
    }
}

impl<const N: usize> From<[(&'static str, usize, usize); N]> for ContainerInfo {
    fn from(value: [(&'static str, usize, usize); N]) -> Self {
        Self {
            entries: value
                .into_iter()
                .map(|(name, count, sizeof_element)| ContainerInfoEntry {
                    name: name.to_owned(),
                    count,
                    sizeof_element,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tuple_array() {
        let info: ContainerInfo = [("pending", 3, 32)].into();
        assert_eq!(
            info.entries(),
            [ContainerInfoEntry {
                name: "pending".to_owned(),
                count: 3,
                sizeof_element: 32,
            }]
        );
    }
}
