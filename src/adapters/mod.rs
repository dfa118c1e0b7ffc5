/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Adapters: concrete implementations of the secondary ports

pub mod secondary {
    pub mod command {
        pub mod unix;

        pub use unix::UnixCommandExecutor;
    }

    pub mod filesystem {
        pub mod local;

        pub use local::LocalFileSource;
    }

    pub mod system {
        pub mod getprop;
        pub mod hwmon;
        pub mod linux;
        pub mod location;

        pub use getprop::GetpropPropertyLookup;
        pub use hwmon::HwmonSensorService;
        pub use linux::LinuxBuildInfo;
        pub use location::ConfiguredLocationService;
    }

    pub mod publisher {
        pub mod file;

        pub use file::FileInventoryPublisher;
    }

    pub use command::*;
    pub use filesystem::*;
    pub use publisher::*;
    pub use system::*;
}

pub use secondary::*;
