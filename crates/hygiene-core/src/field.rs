//! Field accessors.
//!
//! A [`Field`] is the read/write capability for one directly accessible member
//! of a type. Pipelines never touch struct members themselves; they read a
//! field's current value, run a sub-pipeline on it and write the result back
//! through the accessors registered here.
//!
//! ```rust
//! use hygiene_core::{field, Field};
//!
//! #[derive(Clone, Default)]
//! struct Contact {
//!     phone: String,
//! }
//!
//! let phone: Field<Contact, String> = field!(Contact, phone);
//! let mut contact = Contact { phone: "555".into() };
//! phone.write(&mut contact, "556".into()).unwrap();
//! assert_eq!(phone.read(&contact), "556");
//! ```
//!
//! [`FieldDescriptor`] is the type-erased form stored in path expressions and
//! resolved chains, where consecutive fields have different owner types.

use crate::error::{Error, Result, WriteAccess};
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

type Getter<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;
type Setter<T, V> = Arc<dyn Fn(&mut T, V) + Send + Sync>;

pub(crate) type ErasedValue = Box<dyn Any + Send>;
type ErasedRead = Arc<dyn Fn(&dyn Any) -> Option<ErasedValue> + Send + Sync>;
type ErasedWrite = Arc<dyn Fn(&mut dyn Any, ErasedValue) -> bool + Send + Sync>;

enum SetterSlot<T, V> {
    Public(Setter<T, V>),
    Private,
    Absent,
}

impl<T, V> Clone for SetterSlot<T, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Public(setter) => Self::Public(Arc::clone(setter)),
            Self::Private => Self::Private,
            Self::Absent => Self::Absent,
        }
    }
}

/// Read/write accessors for a field of type `V` declared on `T`.
pub struct Field<T, V> {
    name: &'static str,
    getter: Getter<T, V>,
    setter: SetterSlot<T, V>,
}

impl<T, V> Field<T, V> {
    /// Create a field with a public setter.
    pub fn new<G, S>(name: &'static str, get: G, set: S) -> Self
    where
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            name,
            getter: Arc::new(get),
            setter: SetterSlot::Public(Arc::new(set)),
        }
    }

    /// Create a field whose setter exists but is not visible to pipelines.
    pub fn with_private_setter<G>(name: &'static str, get: G) -> Self
    where
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            name,
            getter: Arc::new(get),
            setter: SetterSlot::Private,
        }
    }

    /// Create a field that can only be read.
    pub fn read_only<G>(name: &'static str, get: G) -> Self
    where
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            name,
            getter: Arc::new(get),
            setter: SetterSlot::Absent,
        }
    }

    /// Name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How the field may be written.
    pub fn write_access(&self) -> WriteAccess {
        match self.setter {
            SetterSlot::Public(_) => WriteAccess::Public,
            SetterSlot::Private => WriteAccess::Private,
            SetterSlot::Absent => WriteAccess::Absent,
        }
    }

    /// Read the current value.
    pub fn read(&self, owner: &T) -> V {
        (self.getter)(owner)
    }

    /// Write a new value through the public setter.
    pub fn write(&self, owner: &mut T, value: V) -> Result<()> {
        match &self.setter {
            SetterSlot::Public(setter) => {
                setter(owner, value);
                Ok(())
            }
            SetterSlot::Private | SetterSlot::Absent => Err(Error::FieldNotWritable {
                owner: type_name::<T>(),
                field: self.name,
                access: self.write_access(),
            }),
        }
    }
}

impl<T, V> Clone for Field<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            getter: Arc::clone(&self.getter),
            setter: self.setter.clone(),
        }
    }
}

impl<T, V> fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("owner", &type_name::<T>())
            .field("name", &self.name)
            .field("value", &type_name::<V>())
            .field("access", &self.write_access())
            .finish()
    }
}

/// Build a public read/write [`Field`] for a plain struct member.
///
/// Reading clones the member, writing assigns it.
///
/// ```rust
/// use hygiene_core::field;
///
/// #[derive(Clone)]
/// struct Address {
///     city: String,
/// }
///
/// let city = field!(Address, city);
/// assert_eq!(city.name(), "city");
/// ```
#[macro_export]
macro_rules! field {
    ($owner:ty, $member:ident) => {
        $crate::Field::new(
            stringify!($member),
            |owner: &$owner| ::std::clone::Clone::clone(&owner.$member),
            |owner: &mut $owner, value| owner.$member = value,
        )
    };
}

/// Hashable identity of a field: the declaring type plus the field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    owner: TypeId,
    name: &'static str,
}

impl FieldKey {
    /// Name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Type-erased field identity and accessors.
#[derive(Clone)]
pub struct FieldDescriptor {
    key: FieldKey,
    owner_name: &'static str,
    value: TypeId,
    value_name: &'static str,
    access: WriteAccess,
    read: ErasedRead,
    write: Option<ErasedWrite>,
}

impl FieldDescriptor {
    /// Identity of the field.
    pub fn key(&self) -> FieldKey {
        self.key
    }

    /// Name of the field.
    pub fn name(&self) -> &'static str {
        self.key.name
    }

    /// Type id of the declaring type.
    pub fn owner_type(&self) -> TypeId {
        self.key.owner
    }

    /// Name of the declaring type.
    pub fn owner_name(&self) -> &'static str {
        self.owner_name
    }

    /// Type id of the field's value.
    pub fn value_type(&self) -> TypeId {
        self.value
    }

    /// Name of the field's value type.
    pub fn value_name(&self) -> &'static str {
        self.value_name
    }

    /// How the field may be written.
    pub fn write_access(&self) -> WriteAccess {
        self.access
    }

    pub(crate) fn read(&self, owner: &dyn Any) -> Result<ErasedValue> {
        (self.read)(owner).ok_or(Error::ValueTypeMismatch {
            field: self.key.name,
            expected: self.owner_name,
        })
    }

    pub(crate) fn write(&self, owner: &mut dyn Any, value: ErasedValue) -> Result<()> {
        let write = self.write.as_ref().ok_or(Error::FieldNotWritable {
            owner: self.owner_name,
            field: self.key.name,
            access: self.access,
        })?;

        if write(owner, value) {
            Ok(())
        } else {
            Err(Error::ValueTypeMismatch {
                field: self.key.name,
                expected: self.value_name,
            })
        }
    }
}

impl<T, V> From<Field<T, V>> for FieldDescriptor
where
    T: 'static,
    V: Send + 'static,
{
    fn from(field: Field<T, V>) -> Self {
        let access = field.write_access();
        let getter = field.getter;
        let read: ErasedRead = Arc::new(move |owner: &dyn Any| {
            owner
                .downcast_ref::<T>()
                .map(|owner| Box::new(getter(owner)) as ErasedValue)
        });

        let write = match field.setter {
            SetterSlot::Public(setter) => {
                let write: ErasedWrite = Arc::new(move |owner: &mut dyn Any, value: ErasedValue| {
                    match (owner.downcast_mut::<T>(), value.downcast::<V>()) {
                        (Some(owner), Ok(value)) => {
                            setter(owner, *value);
                            true
                        }
                        _ => false,
                    }
                });
                Some(write)
            }
            SetterSlot::Private | SetterSlot::Absent => None,
        };

        Self {
            key: FieldKey {
                owner: TypeId::of::<T>(),
                name: field.name,
            },
            owner_name: type_name::<T>(),
            value: TypeId::of::<V>(),
            value_name: type_name::<V>(),
            access,
            read,
            write,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("owner", &self.owner_name)
            .field("name", &self.key.name)
            .field("value", &self.value_name)
            .field("access", &self.access)
            .finish()
    }
}
