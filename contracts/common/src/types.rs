use soroban_sdk::{contracttype, symbol_short, String, Symbol};

/// Kinds of personal data the registry accepts.
///
/// Callers pass the lowercase symbol (`fitness`, `vitals`, `sleep`); anything
/// else is rejected before it reaches storage.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DataType {
    Fitness = 0,
    Vitals = 1,
    Sleep = 2,
}

impl DataType {
    pub fn from_symbol(symbol: &Symbol) -> Option<Self> {
        if *symbol == symbol_short!("fitness") {
            Some(DataType::Fitness)
        } else if *symbol == symbol_short!("vitals") {
            Some(DataType::Vitals)
        } else if *symbol == symbol_short!("sleep") {
            Some(DataType::Sleep)
        } else {
            None
        }
    }

    pub fn to_symbol(self) -> Symbol {
        match self {
            DataType::Fitness => symbol_short!("fitness"),
            DataType::Vitals => symbol_short!("vitals"),
            DataType::Sleep => symbol_short!("sleep"),
        }
    }
}

/// The slice of a data entry the anonymization pool needs to decide whether
/// the entry may be submitted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntrySummary {
    pub data_type: DataType,
    pub category: String,
    pub consent: bool,
}
